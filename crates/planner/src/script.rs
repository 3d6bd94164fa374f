//! Batch script that recreates a reference table and fills it with rows.

use crate::query::{
    ast::{common::TableRef, create_database::CreateDatabase},
    builder::{
        create_table::CreateTableBuilder, drop_table::DropTableBuilder, insert::InsertBuilder,
    },
    dialect::Dialect,
    renderer::render,
};
use model::{SqlType, Value};

/// A single `INSERT ... VALUES` accepts at most this many row constructors.
pub const MAX_ROWS_PER_INSERT: usize = 1000;

/// Batch separator understood by `sqlcmd`.
const BATCH_SEPARATOR: &str = "GO";

/// Statements that (re)build `database.table` with `columns` named `col0`,
/// `col1`, ... and insert `rows` into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceScript {
    batches: Vec<String>,
}

impl ReferenceScript {
    pub fn new(
        dialect: &dyn Dialect,
        database: &str,
        table: &str,
        columns: &[SqlType],
        rows: &[Vec<Option<Value>>],
    ) -> Self {
        let table = TableRef {
            schema: None,
            name: table.to_string(),
        };

        let create_database = CreateDatabase {
            name: database.to_string(),
            if_not_exists: true,
        };
        let drop_table = DropTableBuilder::new(table.clone()).if_exists().build();
        let create_table = CreateTableBuilder::new(table.clone())
            .numbered_columns(columns)
            .build();

        let mut batches = vec![
            render(&create_database, dialect),
            format!("USE {};", dialect.quote_identifier(database)),
            format!(
                "{}\n{}",
                render(&drop_table, dialect),
                render(&create_table, dialect)
            ),
        ];
        for chunk in rows.chunks(MAX_ROWS_PER_INSERT) {
            let insert = InsertBuilder::new(table.clone(), columns.to_vec())
                .rows(chunk.iter().map(Vec::as_slice))
                .build();
            batches.push(render(&insert, dialect));
        }

        Self { batches }
    }

    pub fn batches(&self) -> &[String] {
        &self.batches
    }

    /// The whole script, batches separated by `GO` lines.
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        for batch in &self.batches {
            sql.push_str(batch);
            sql.push('\n');
            sql.push_str(BATCH_SEPARATOR);
            sql.push('\n');
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dialect::SqlServer;

    fn kikoo() -> (Vec<SqlType>, Vec<Vec<Option<Value>>>) {
        (
            vec![
                SqlType::nchar(10).unwrap(),
                SqlType::char(10).unwrap(),
                SqlType::Int,
            ],
            vec![vec![
                Some(Value::Text("KIKOO".to_string())),
                Some(Value::Text("KIKOO".to_string())),
                Some(Value::Int(10)),
            ]],
        )
    }

    #[test]
    fn test_reference_script() {
        let (columns, rows) = kikoo();
        let script = ReferenceScript::new(&SqlServer, "BCPTest", "BCPTest", &columns, &rows);

        assert_eq!(
            script.to_sql(),
            concat!(
                "IF DB_ID('BCPTest') IS NULL CREATE DATABASE [BCPTest];\nGO\n",
                "USE [BCPTest];\nGO\n",
                "IF OBJECT_ID('[BCPTest]', 'U') IS NOT NULL DROP TABLE [BCPTest];\n",
                "CREATE TABLE [BCPTest] ([col0] nchar(10), [col1] char(10), [col2] int);\nGO\n",
                "INSERT INTO [BCPTest] VALUES (N'KIKOO', 'KIKOO', 10);\nGO\n",
            )
        );
    }

    #[test]
    fn test_no_rows_means_no_insert() {
        let (columns, _) = kikoo();
        let script = ReferenceScript::new(&SqlServer, "db", "t", &columns, &[]);
        assert_eq!(script.batches().len(), 3);
    }

    #[test]
    fn test_large_inserts_are_split() {
        let columns = vec![SqlType::Int];
        let rows: Vec<_> = (0..2500).map(|i| vec![Some(Value::Int(i))]).collect();
        let script = ReferenceScript::new(&SqlServer, "db", "t", &columns, &rows);

        let inserts: Vec<_> = script
            .batches()
            .iter()
            .filter(|b| b.starts_with("INSERT"))
            .collect();
        assert_eq!(inserts.len(), 3);
        assert!(inserts[2].ends_with("(2499);"));
    }
}
