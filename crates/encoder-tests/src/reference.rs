//! Files written locally, checked against expected native-format bytes.
//!
//! The fixtures are worked out from the wire layout of each type; the
//! `integration` tests compare against a live `bcp out -n` instead.

#[cfg(test)]
mod tests {
    use crate::{
        utils::{
            ALL_TYPES_ROW, DATE_1753, DATETIME_2004, DATETIME2_FINE, FLOAT_3_5, GUID, KIKOO_ROW,
            TIME_SCALE_7, VARCHAR_MAX_ABC, XML_ROOT, all_columns, all_values, date, datetime,
            guid, kikoo_columns, kikoo_row, xml,
        },
        write_file, written_bytes,
    };
    use chrono::NaiveTime;
    use encoder::{CodePage, WriterConfig, WriterError, utils::from_hex};
    use model::{SqlType, Value};
    use pretty_assertions::assert_eq;

    fn hex(fixture: &str) -> Vec<u8> {
        from_hex(fixture).expect("fixture is valid hex")
    }

    fn single(data_type: &str, value: Value) -> Vec<u8> {
        written_bytes(&[data_type.parse().unwrap()], &[vec![Some(value)]])
    }

    // Scenario: one row of nchar(10), char(10), int.
    // Expected Outcome: padded UTF-16 text, padded code-page text, then the int.
    #[test]
    fn tc01() {
        assert_eq!(written_bytes(&kikoo_columns(), &[kikoo_row()]), hex(KIKOO_ROW));
    }

    // Scenario: the same row written three times.
    // Expected Outcome: the file is the row bytes repeated, with nothing in between.
    #[test]
    fn tc02() {
        let rows = vec![kikoo_row(), kikoo_row(), kikoo_row()];
        assert_eq!(written_bytes(&kikoo_columns(), &rows), hex(KIKOO_ROW).repeat(3));
    }

    // Scenario: no rows at all.
    // Expected Outcome: an empty file.
    #[test]
    fn tc03() {
        assert!(written_bytes(&kikoo_columns(), &[]).is_empty());
    }

    // Scenario: temporal columns at their reference values.
    #[test]
    fn tc04() {
        assert_eq!(single("date", Value::Date(date(1753, 1, 1))), hex(DATE_1753));
        assert_eq!(
            single(
                "time(7)",
                Value::Time(NaiveTime::from_hms_nano_opt(12, 35, 29, 123_456_700).unwrap())
            ),
            hex(TIME_SCALE_7)
        );
        assert_eq!(
            single("datetime2", Value::DateTime(datetime(2004, 5, 23, 123_456_789))),
            hex(DATETIME2_FINE)
        );
        assert_eq!(
            single("datetime", Value::DateTime(datetime(2004, 5, 23, 123_000_000))),
            hex(DATETIME_2004)
        );
    }

    // Scenario: guid, float, varchar(max) and xml cells.
    #[test]
    fn tc05() {
        assert_eq!(single("uniqueidentifier", Value::Uuid(guid())), hex(GUID));
        assert_eq!(single("float", Value::Float(3.5)), hex(FLOAT_3_5));
        assert_eq!(
            single("varchar(max)", Value::Text("abc".to_string())),
            hex(VARCHAR_MAX_ABC)
        );
        assert_eq!(single("xml", Value::Xml(xml("<root/>"))), hex(XML_ROOT));
    }

    // Scenario: one column of every type, all populated.
    // Expected Outcome: each cell in its own wire form, concatenated in column order.
    #[test]
    fn tc06() {
        assert_eq!(written_bytes(&all_columns(), &[all_values()]), hex(ALL_TYPES_ROW));
    }

    // Scenario: one column of every type, all null.
    // Expected Outcome: each cell is its prefix filled with 0xFF.
    #[test]
    fn tc07() {
        let nulls = vec![None; all_columns().len()];
        let mut expected = Vec::new();
        for width in [1, 1, 1, 1, 1, 2, 2, 2, 8, 2, 8, 4, 4, 8, 1, 1, 1, 1] {
            expected.extend(std::iter::repeat_n(0xff, width));
        }
        assert_eq!(written_bytes(&all_columns(), &[nulls]), expected);
    }

    // Scenario: the second row holds a value too long for its column.
    // Expected Outcome: the writer reports row 1, and the first row stays in the output.
    #[test]
    fn tc08() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.bcp");
        let columns = vec![SqlType::char(3).unwrap()];
        let mut writer =
            encoder::BcpWriter::create(&path, columns, WriterConfig::default()).unwrap();

        writer.write_row(&[Some(Value::Text("abc".into()))]).unwrap();
        let err = writer
            .write_row(&[Some(Value::Text("abcd".into()))])
            .unwrap_err();
        assert!(matches!(err, WriterError::Encoding { row: 1, column: 0, .. }));
        writer.finish().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x03\x00abc".to_vec());
    }

    // Scenario: a Cyrillic code page for varchar columns.
    // Expected Outcome: text encoded with Windows-1251, nvarchar unaffected.
    #[test]
    fn tc09() {
        let dir = tempfile::tempdir().unwrap();
        let columns = vec![SqlType::varchar(2).unwrap(), SqlType::nvarchar(2).unwrap()];
        let row = vec![
            Some(Value::Text("Да".to_string())),
            Some(Value::Text("Да".to_string())),
        ];
        let config =
            WriterConfig::default().with_code_page(CodePage::from_number(1251).unwrap());
        let path = write_file(dir.path(), "cyrillic.bcp", &columns, &[row], config);

        assert_eq!(std::fs::read(path).unwrap(), hex("0200c4e0040014043004"));
    }

    // Scenario: pairs of distinct values under the same column type.
    // Expected Outcome: distinct byte sequences.
    #[test]
    fn tc10() {
        let pairs = [
            ("int", Value::Int(1), Value::Int(256)),
            ("float(24)", Value::Real(1.0), Value::Real(-1.0)),
            ("nchar(2)", Value::Text("a".into()), Value::Text("b".into())),
            ("varchar(max)", Value::Text("".into()), Value::Text(" ".into())),
            ("date", Value::Date(date(1, 1, 1)), Value::Date(date(9999, 12, 31))),
            (
                "datetime2",
                Value::DateTime(datetime(2004, 5, 23, 0)),
                Value::DateTime(datetime(2004, 5, 23, 100)),
            ),
        ];
        for (data_type, left, right) in pairs {
            assert_ne!(single(data_type, left), single(data_type, right), "{data_type}");
        }
    }

    // Scenario: a char column written with the DOS code page 850.
    // Expected Outcome: OEM bytes for the accented letters.
    #[test]
    fn tc11() {
        let dir = tempfile::tempdir().unwrap();
        let config = WriterConfig::default().with_code_page(CodePage::from_number(850).unwrap());
        let path = write_file(
            dir.path(),
            "oem.bcp",
            &[SqlType::char(4).unwrap()],
            &[vec![Some(Value::Text("Grüß".to_string()))]],
            config,
        );

        assert_eq!(std::fs::read(path).unwrap(), hex("0400477281e1"));
    }
}
