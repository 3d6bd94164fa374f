use crate::core::{
    data_type::{Scale, SqlType},
    error::ConversionError,
    temporal::{format_datetime, format_time},
    utils::{from_hex, to_hex},
    xml::XmlDocument,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use uuid::Uuid;

/// A non-null cell value. Absent values are carried as `None` next to it.
///
/// Each variant is the representation one family of [`SqlType`]s expects; see
/// [`SqlType::accepts`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    BigInt(i64),
    Real(f32),
    Float(f64),
    Uuid(Uuid),
    Text(String),
    Binary(Vec<u8>),
    Xml(XmlDocument),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

/// Shape of a [`Value`], used in mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    BigInt,
    Real,
    Float,
    Uuid,
    Text,
    Binary,
    Xml,
    Date,
    Time,
    DateTime,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "32-bit integer",
            ValueKind::BigInt => "64-bit integer",
            ValueKind::Real => "single precision float",
            ValueKind::Float => "double precision float",
            ValueKind::Uuid => "uuid",
            ValueKind::Text => "text",
            ValueKind::Binary => "binary",
            ValueKind::Xml => "xml document",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::DateTime => "date and time",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Real(_) => ValueKind::Real,
            Value::Float(_) => ValueKind::Float,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Text(_) => ValueKind::Text,
            Value::Binary(_) => ValueKind::Binary,
            Value::Xml(_) => ValueKind::Xml,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// Converts a JSON cell into the value `data_type` expects.
    ///
    /// JSON `null` maps to `None`. Binary cells are hex strings, temporal cells
    /// ISO-8601 strings, uuids hyphenated strings.
    pub fn from_json(
        data_type: &SqlType,
        json: &serde_json::Value,
    ) -> Result<Option<Value>, ConversionError> {
        if json.is_null() {
            return Ok(None);
        }

        let column = data_type.to_string();
        let unexpected = |expected: &'static str| ConversionError::UnexpectedJson {
            column: column.clone(),
            expected,
            found: json.to_string(),
        };
        let out_of_range = || ConversionError::OutOfRange {
            column: column.clone(),
            value: json.to_string(),
        };
        let parse_error = |raw: &str, reason: String| ConversionError::Parse {
            column: column.clone(),
            value: raw.to_string(),
            reason,
        };

        let value = match data_type {
            SqlType::Int => {
                let n = json.as_i64().ok_or_else(|| unexpected("integer"))?;
                Value::Int(i32::try_from(n).map_err(|_| out_of_range())?)
            }
            SqlType::BigInt => Value::BigInt(json.as_i64().ok_or_else(|| unexpected("integer"))?),
            SqlType::Real => Value::Real(json.as_f64().ok_or_else(|| unexpected("number"))? as f32),
            SqlType::Float(bits) => {
                let n = json.as_f64().ok_or_else(|| unexpected("number"))?;
                if bits.is_single_precision() {
                    Value::Real(n as f32)
                } else {
                    Value::Float(n)
                }
            }
            SqlType::UniqueIdentifier => {
                let raw = json.as_str().ok_or_else(|| unexpected("uuid string"))?;
                Value::Uuid(Uuid::parse_str(raw).map_err(|e| parse_error(raw, e.to_string()))?)
            }
            SqlType::Char(_)
            | SqlType::NChar(_)
            | SqlType::VarChar(_)
            | SqlType::NVarChar(_)
            | SqlType::Text
            | SqlType::NText => {
                Value::Text(json.as_str().ok_or_else(|| unexpected("string"))?.to_string())
            }
            SqlType::Binary(_) | SqlType::VarBinary(_) => {
                let raw = json.as_str().ok_or_else(|| unexpected("hex string"))?;
                let hex = raw.strip_prefix("0x").unwrap_or(raw);
                Value::Binary(from_hex(hex).map_err(|source| ConversionError::Format {
                    column: column.clone(),
                    source,
                })?)
            }
            SqlType::Xml => {
                let raw = json.as_str().ok_or_else(|| unexpected("xml string"))?;
                Value::Xml(XmlDocument::parse(raw).map_err(|source| {
                    ConversionError::Format {
                        column: column.clone(),
                        source,
                    }
                })?)
            }
            SqlType::Date => {
                let raw = json.as_str().ok_or_else(|| unexpected("date string"))?;
                Value::Date(raw.parse().map_err(|e: chrono::ParseError| {
                    parse_error(raw, e.to_string())
                })?)
            }
            SqlType::Time(_) => {
                let raw = json.as_str().ok_or_else(|| unexpected("time string"))?;
                Value::Time(raw.parse().map_err(|e: chrono::ParseError| {
                    parse_error(raw, e.to_string())
                })?)
            }
            SqlType::DateTime | SqlType::DateTime2(_) => {
                let raw = json.as_str().ok_or_else(|| unexpected("datetime string"))?;
                Value::DateTime(parse_datetime(raw).map_err(|e| parse_error(raw, e.to_string()))?)
            }
        };

        Ok(Some(value))
    }
}

impl Value {
    /// T-SQL literal for this value in a column of `data_type`.
    ///
    /// Strings are `N'...'` for unicode columns and plain `'...'` otherwise,
    /// so the server converts them with the column's collation.
    pub fn to_sql_literal(&self, data_type: &SqlType) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::BigInt(v) => v.to_string(),
            Value::Real(v) => format!("{v:e}"),
            Value::Float(v) => format!("{v:e}"),
            Value::Uuid(v) => format!("'{v}'"),
            Value::Text(v) if data_type.is_unicode() => format!("N{}", quote(v)),
            Value::Text(v) => quote(v),
            Value::Binary(v) => format!("0x{}", to_hex(v)),
            Value::Xml(v) => format!("N{}", quote(v.outer_xml())),
            Value::Date(v) => format!("'{}'", v.format("%Y-%m-%d")),
            Value::Time(v) => format!("'{}'", format_time(v, literal_scale(data_type))),
            Value::DateTime(v) if *data_type == SqlType::DateTime => {
                format!("'{}'", format_datetime(v))
            }
            Value::DateTime(v) => format!(
                "'{}T{}'",
                v.format("%Y-%m-%d"),
                format_time(&v.time(), literal_scale(data_type))
            ),
        }
    }
}

/// Fraction digits of a temporal literal. An unscaled column is created with
/// the server default of 7.
fn literal_scale(data_type: &SqlType) -> Scale {
    match data_type {
        SqlType::Time(scale) | SqlType::DateTime2(Some(scale)) => *scale,
        _ => Scale::default(),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Accepts both `2004-05-23T14:25:10` and `2004-05-23 14:25:10`.
fn parse_datetime(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
}

impl SqlType {
    /// Whether `value` has the representation this column type is written from.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (SqlType::Int, Value::Int(_))
            | (SqlType::BigInt, Value::BigInt(_))
            | (SqlType::Real, Value::Real(_))
            | (SqlType::Float(_), Value::Real(_) | Value::Float(_))
            | (SqlType::UniqueIdentifier, Value::Uuid(_))
            | (SqlType::Binary(_) | SqlType::VarBinary(_), Value::Binary(_))
            | (SqlType::Xml, Value::Xml(_))
            | (SqlType::Date, Value::Date(_))
            | (SqlType::Time(_), Value::Time(_))
            | (SqlType::DateTime | SqlType::DateTime2(_), Value::DateTime(_)) => true,
            (
                SqlType::Char(_)
                | SqlType::NChar(_)
                | SqlType::VarChar(_)
                | SqlType::NVarChar(_)
                | SqlType::Text
                | SqlType::NText,
                Value::Text(_),
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::BigInt(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Binary(v) => write!(f, "0x{}", to_hex(v)),
            Value::Xml(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_matches_families() {
        let text = Value::Text("KIKOO".to_string());
        assert!(SqlType::char(10).unwrap().accepts(&text));
        assert!(SqlType::NText.accepts(&text));
        assert!(!SqlType::Int.accepts(&text));
        assert!(SqlType::float(10).unwrap().accepts(&Value::Real(1.0)));
        assert!(SqlType::float(53).unwrap().accepts(&Value::Float(1.0)));
        assert!(!SqlType::Real.accepts(&Value::Float(1.0)));
        assert!(!SqlType::Int.accepts(&Value::BigInt(1)));
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from_json(&SqlType::Int, &json!(null)).unwrap(), None);
        assert_eq!(
            Value::from_json(&SqlType::Int, &json!(10)).unwrap(),
            Some(Value::Int(10))
        );
        assert!(matches!(
            Value::from_json(&SqlType::Int, &json!(5_000_000_000i64)),
            Err(ConversionError::OutOfRange { .. })
        ));
        assert_eq!(
            Value::from_json(&SqlType::float(24).unwrap(), &json!(1.5)).unwrap(),
            Some(Value::Real(1.5))
        );
        assert_eq!(
            Value::from_json(&SqlType::float(53).unwrap(), &json!(1.5)).unwrap(),
            Some(Value::Float(1.5))
        );
        assert!(matches!(
            Value::from_json(&SqlType::BigInt, &json!("12")),
            Err(ConversionError::UnexpectedJson { .. })
        ));
    }

    #[test]
    fn test_from_json_structured() {
        assert_eq!(
            Value::from_json(&SqlType::varbinary(4).unwrap(), &json!("0xCAFE")).unwrap(),
            Some(Value::Binary(vec![0xca, 0xfe]))
        );
        assert!(matches!(
            Value::from_json(&SqlType::binary(4).unwrap(), &json!("abc")),
            Err(ConversionError::Format { .. })
        ));
        assert_eq!(
            Value::from_json(&SqlType::DateTime2(None), &json!("2004-05-23 14:25:10.5"))
                .unwrap(),
            Some(Value::DateTime(
                NaiveDate::from_ymd_opt(2004, 5, 23)
                    .unwrap()
                    .and_hms_milli_opt(14, 25, 10, 500)
                    .unwrap()
            ))
        );
        assert_eq!(
            Value::from_json(&SqlType::Date, &json!("1753-01-01")).unwrap(),
            Some(Value::Date(NaiveDate::from_ymd_opt(1753, 1, 1).unwrap()))
        );
        assert!(Value::from_json(&SqlType::UniqueIdentifier, &json!("nope")).is_err());
    }

    #[test]
    fn test_sql_literals() {
        let text = Value::Text("it's".to_string());
        assert_eq!(text.to_sql_literal(&SqlType::nchar(10).unwrap()), "N'it''s'");
        assert_eq!(text.to_sql_literal(&SqlType::char(10).unwrap()), "'it''s'");
        assert_eq!(Value::Int(-3).to_sql_literal(&SqlType::Int), "-3");
        assert_eq!(Value::Float(3.5).to_sql_literal(&SqlType::float(53).unwrap()), "3.5e0");
        assert_eq!(
            Value::Binary(vec![0xca, 0xfe]).to_sql_literal(&SqlType::binary(2).unwrap()),
            "0xcafe"
        );

        let datetime = NaiveDate::from_ymd_opt(2004, 5, 23)
            .unwrap()
            .and_hms_micro_opt(14, 25, 10, 123_400)
            .unwrap();
        assert_eq!(
            Value::DateTime(datetime).to_sql_literal(&SqlType::DateTime),
            "'2004-05-23T14:25:10.123'"
        );
        assert_eq!(
            Value::DateTime(datetime).to_sql_literal(&SqlType::DateTime2(None)),
            "'2004-05-23T14:25:10.1234000'"
        );
    }

    #[test]
    fn test_temporal_literals_keep_column_digits() {
        let time = NaiveTime::from_hms_nano_opt(12, 35, 29, 123_456_700).unwrap();
        assert_eq!(
            Value::Time(time).to_sql_literal(&SqlType::time(7).unwrap()),
            "'12:35:29.1234567'"
        );
        assert_eq!(
            Value::Time(time).to_sql_literal(&SqlType::time(2).unwrap()),
            "'12:35:29.12'"
        );

        let datetime = NaiveDate::from_ymd_opt(2004, 5, 23)
            .unwrap()
            .and_hms_nano_opt(14, 25, 10, 123_456_789)
            .unwrap();
        assert_eq!(
            Value::DateTime(datetime).to_sql_literal(&SqlType::datetime2(7).unwrap()),
            "'2004-05-23T14:25:10.1234567'"
        );
        assert_eq!(
            Value::DateTime(datetime).to_sql_literal(&SqlType::datetime2(0).unwrap()),
            "'2004-05-23T14:25:10'"
        );
    }

    #[test]
    fn test_datetime_literal_follows_tick_rounding() {
        let sub_milli = NaiveDate::from_ymd_opt(2004, 5, 23)
            .unwrap()
            .and_hms_nano_opt(0, 0, 10, 1_999_900)
            .unwrap();
        assert_eq!(
            Value::DateTime(sub_milli).to_sql_literal(&SqlType::DateTime),
            "'2004-05-23T00:00:10.003'"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Binary(vec![0x0a, 0xff]).to_string(), "0x0aff");
        assert_eq!(
            Value::Time(NaiveTime::from_hms_opt(1, 2, 3).unwrap()).to_string(),
            "01:02:03"
        );
    }
}
