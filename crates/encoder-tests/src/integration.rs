//! Round trips through a live SQL Server. Run with `--ignored` and the
//! `BCP_ORACLE_*` variables pointing at a server with `sqlcmd` and `bcp` on
//! the path.

#[cfg(test)]
mod tests {
    use crate::{
        live_oracle,
        utils::{all_columns, all_values, kikoo_columns, kikoo_row},
        write_file,
    };
    use encoder::WriterConfig;
    use model::{SqlType, Value};
    use oracle::ReferenceBackend;
    use tracing::info;
    use tracing_test::traced_test;

    async fn assert_identical(columns: &[SqlType], rows: &[Vec<Option<Value>>]) {
        let Some(oracle) = live_oracle() else {
            info!("No reference server configured, skipping");
            return;
        };

        let dir = tempfile::tempdir().unwrap();
        let written = write_file(dir.path(), "live.bcp", columns, rows, WriterConfig::default());
        let comparison = oracle.verify(columns, rows, &written).await.unwrap();
        assert!(comparison.is_identical(), "{comparison}");
    }

    // Scenario: the nchar/char/int row loaded into the server and exported again.
    // Expected Outcome: byte-identical files.
    #[traced_test]
    #[tokio::test]
    #[ignore]
    async fn tc01() {
        assert_identical(&kikoo_columns(), &[kikoo_row()]).await;
    }

    // Scenario: every type, one populated row and one null row.
    // Expected Outcome: byte-identical files.
    #[traced_test]
    #[tokio::test]
    #[ignore]
    async fn tc02() {
        // The server stores an unscaled datetime2 at scale 7.
        let columns: Vec<_> = all_columns()
            .into_iter()
            .map(|column| match column {
                SqlType::DateTime2(None) => SqlType::datetime2(7).unwrap(),
                other => other,
            })
            .collect();
        let rows = vec![all_values(), vec![None; columns.len()]];
        assert_identical(&columns, &rows).await;
    }

    // Scenario: more rows than a single INSERT statement accepts.
    // Expected Outcome: byte-identical files.
    #[traced_test]
    #[tokio::test]
    #[ignore]
    async fn tc03() {
        let columns = vec![SqlType::Int, SqlType::nvarchar(20).unwrap()];
        let rows: Vec<_> = (0..2500)
            .map(|i| {
                vec![
                    Some(Value::Int(i)),
                    (i % 3 != 0).then(|| Value::Text(format!("row {i}"))),
                ]
            })
            .collect();
        assert_identical(&columns, &rows).await;
    }
}
