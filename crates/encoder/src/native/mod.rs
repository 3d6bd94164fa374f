//! Per-type encoders for the SQL Server native bulk-copy format (`bcp -n`).
//!
//! Every value is written as a length indicator followed by its payload, or as
//! a null marker alone. Encoders are stateless: the bytes produced depend only
//! on the column type, the value and the configured code page.

use crate::{code_page::CodePage, error::EncodingError};
use bytes::BufMut;
use model::{SqlType, Value};

pub mod binary;
pub mod character;
pub mod identifier;
pub mod numeric;
pub mod temporal;
pub mod xml;

pub use binary::{BinaryEncoder, VarBinaryEncoder};
pub use character::{
    CharEncoder, NCharEncoder, NTextEncoder, NVarCharEncoder, TextEncoder, VarCharEncoder,
};
pub use identifier::UniqueIdentifierEncoder;
pub use numeric::{BigIntEncoder, FloatEncoder, IntEncoder, RealEncoder};
pub use temporal::{DateEncoder, DateTime2Encoder, DateTimeEncoder, TimeEncoder};
pub use xml::XmlEncoder;

/// Largest payload, in bytes, of a large-object value (`(max)`, text, xml).
pub const MAX_LOB_LENGTH: usize = i32::MAX as usize;

/// Fails with [`EncodingError::ValueTooLong`] when `length` exceeds `max`.
pub(crate) fn check_length(
    data_type: SqlType,
    length: usize,
    max: usize,
) -> Result<(), EncodingError> {
    if length > max {
        return Err(EncodingError::ValueTooLong {
            data_type,
            length,
            max,
        });
    }
    Ok(())
}

/// Writes values of one column type into a byte sink.
pub trait NativeEncoder {
    /// The value representation this encoder is written from.
    type Item: ?Sized;

    /// The column type this encoder produces.
    fn data_type(&self) -> SqlType;

    /// Appends one encoded unit for `value` (`None` is SQL NULL).
    ///
    /// On error nothing has been appended.
    fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&Self::Item>,
    ) -> Result<(), EncodingError>;

    /// Encodes a single value into a fresh buffer.
    fn encode(&self, value: Option<&Self::Item>) -> Result<Vec<u8>, EncodingError> {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        Ok(buf)
    }
}

/// Pulls the payload out of a dynamically typed value, rejecting any variant
/// other than `$variant` before a single byte is written.
macro_rules! extract {
    ($data_type:expr, $value:expr, $variant:path) => {
        match $value {
            None => Ok(None),
            Some($variant(inner)) => Ok(Some(inner)),
            Some(other) => Err(EncodingError::TypeMismatch {
                data_type: $data_type,
                found: other.kind(),
            }),
        }
    };
}

/// Encoder for one column, built from its descriptor and the file's code page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnEncoder {
    data_type: SqlType,
    code_page: CodePage,
}

impl ColumnEncoder {
    pub fn new(data_type: SqlType, code_page: CodePage) -> Self {
        Self {
            data_type,
            code_page,
        }
    }

    pub fn data_type(&self) -> &SqlType {
        &self.data_type
    }

    /// Appends the native representation of `value` to `sink`.
    pub fn write<B: BufMut>(
        &self,
        sink: &mut B,
        value: Option<&Value>,
    ) -> Result<(), EncodingError> {
        let data_type = self.data_type;
        let code_page = self.code_page;

        match data_type {
            SqlType::Int => IntEncoder.write(sink, extract!(data_type, value, Value::Int)?),
            SqlType::BigInt => {
                BigIntEncoder.write(sink, extract!(data_type, value, Value::BigInt)?)
            }
            SqlType::Real => RealEncoder.write(sink, extract!(data_type, value, Value::Real)?),
            SqlType::Float(bits) => {
                let encoder = FloatEncoder::new(bits);
                match value {
                    None => {
                        encoder.write_null(sink);
                        Ok(())
                    }
                    Some(Value::Real(v)) => encoder.write_single(sink, Some(*v)),
                    Some(Value::Float(v)) => encoder.write_double(sink, Some(*v)),
                    Some(other) => Err(EncodingError::TypeMismatch {
                        data_type,
                        found: other.kind(),
                    }),
                }
            }
            SqlType::UniqueIdentifier => {
                UniqueIdentifierEncoder.write(sink, extract!(data_type, value, Value::Uuid)?)
            }
            SqlType::Char(length) => CharEncoder::new(length, code_page).write(
                sink,
                extract!(data_type, value, Value::Text)?.map(String::as_str),
            ),
            SqlType::NChar(length) => NCharEncoder::new(length).write(
                sink,
                extract!(data_type, value, Value::Text)?.map(String::as_str),
            ),
            SqlType::VarChar(length) => VarCharEncoder::new(length, code_page).write(
                sink,
                extract!(data_type, value, Value::Text)?.map(String::as_str),
            ),
            SqlType::NVarChar(length) => NVarCharEncoder::new(length).write(
                sink,
                extract!(data_type, value, Value::Text)?.map(String::as_str),
            ),
            SqlType::Binary(length) => BinaryEncoder::new(length).write(
                sink,
                extract!(data_type, value, Value::Binary)?.map(Vec::as_slice),
            ),
            SqlType::VarBinary(length) => VarBinaryEncoder::new(length).write(
                sink,
                extract!(data_type, value, Value::Binary)?.map(Vec::as_slice),
            ),
            SqlType::Text => TextEncoder::new(code_page).write(
                sink,
                extract!(data_type, value, Value::Text)?.map(String::as_str),
            ),
            SqlType::NText => NTextEncoder.write(
                sink,
                extract!(data_type, value, Value::Text)?.map(String::as_str),
            ),
            SqlType::Xml => XmlEncoder.write(sink, extract!(data_type, value, Value::Xml)?),
            SqlType::Date => DateEncoder.write(sink, extract!(data_type, value, Value::Date)?),
            SqlType::Time(scale) => {
                TimeEncoder::new(scale).write(sink, extract!(data_type, value, Value::Time)?)
            }
            SqlType::DateTime => {
                DateTimeEncoder.write(sink, extract!(data_type, value, Value::DateTime)?)
            }
            SqlType::DateTime2(scale) => DateTime2Encoder::new(scale)
                .write(sink, extract!(data_type, value, Value::DateTime)?),
        }
    }

    /// Encodes a single value into a fresh buffer.
    pub fn encode(&self, value: Option<&Value>) -> Result<Vec<u8>, EncodingError> {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use model::XmlDocument;
    use uuid::Uuid;

    fn column(ty: &str) -> ColumnEncoder {
        ColumnEncoder::new(ty.parse().unwrap(), CodePage::default())
    }

    #[test]
    fn test_type_mismatch_writes_nothing() {
        let mut buf = vec![0x42];
        let err = column("int")
            .write(&mut buf, Some(&Value::Float(1.0)))
            .unwrap_err();
        assert_eq!(
            err,
            EncodingError::TypeMismatch {
                data_type: SqlType::Int,
                found: model::ValueKind::Float,
            }
        );
        assert_eq!(buf, vec![0x42]);
    }

    #[test]
    fn test_float_precision_mismatch() {
        let err = column("float(10)").encode(Some(&Value::Float(1.0))).unwrap_err();
        assert!(matches!(err, EncodingError::PrecisionMismatch { .. }));
        let err = column("float(53)").encode(Some(&Value::Real(1.0))).unwrap_err();
        assert!(matches!(err, EncodingError::PrecisionMismatch { .. }));
        assert!(column("float(53)").encode(Some(&Value::Text("1".into()))).is_err());
    }

    #[test]
    fn test_null_forms_per_type() {
        let cases = [
            ("int", 1),
            ("bigint", 1),
            ("real", 1),
            ("float", 1),
            ("uniqueidentifier", 1),
            ("char(10)", 2),
            ("nchar(10)", 2),
            ("varchar(10)", 2),
            ("nvarchar(10)", 2),
            ("binary(10)", 2),
            ("varbinary(10)", 2),
            ("varchar(max)", 8),
            ("nvarchar(max)", 8),
            ("varbinary(max)", 8),
            ("text", 4),
            ("ntext", 4),
            ("xml", 8),
            ("date", 1),
            ("time", 1),
            ("datetime", 1),
            ("datetime2", 1),
        ];
        for (ty, width) in cases {
            assert_eq!(column(ty).encode(None).unwrap(), vec![0xff; width], "{ty}");
        }
    }

    #[test]
    fn test_every_type_accepts_its_value() {
        let date = NaiveDate::from_ymd_opt(2004, 5, 23).unwrap();
        let cases = [
            ("int", Value::Int(1)),
            ("bigint", Value::BigInt(1)),
            ("real", Value::Real(1.0)),
            ("float(24)", Value::Real(1.0)),
            ("float", Value::Float(1.0)),
            ("uniqueidentifier", Value::Uuid(Uuid::nil())),
            ("char(3)", Value::Text("a".into())),
            ("nchar(3)", Value::Text("a".into())),
            ("varchar(max)", Value::Text("a".into())),
            ("nvarchar(3)", Value::Text("a".into())),
            ("text", Value::Text("a".into())),
            ("ntext", Value::Text("a".into())),
            ("binary(3)", Value::Binary(vec![1])),
            ("varbinary(max)", Value::Binary(vec![1])),
            ("xml", Value::Xml(XmlDocument::parse("<a/>").unwrap())),
            ("date", Value::Date(date)),
            ("time(3)", Value::Time(NaiveTime::from_hms_opt(1, 2, 3).unwrap())),
            ("datetime", Value::DateTime(date.and_hms_opt(1, 2, 3).unwrap())),
            ("datetime2(7)", Value::DateTime(date.and_hms_opt(1, 2, 3).unwrap())),
        ];
        for (ty, value) in cases {
            let encoder = column(ty);
            assert!(encoder.data_type().accepts(&value), "{ty}");
            let bytes = encoder.encode(Some(&value)).unwrap();
            assert_ne!(bytes, encoder.encode(None).unwrap(), "{ty}");
        }
    }

    #[test]
    fn test_encoding_is_repeatable() {
        let encoder = column("nvarchar(20)");
        let value = Value::Text("KIKOO".into());
        let mut first = bytes::BytesMut::new();
        let mut second = Vec::new();
        encoder.write(&mut first, Some(&value)).unwrap();
        encoder.write(&mut second, Some(&value)).unwrap();
        assert_eq!(first.as_ref(), second.as_slice());
    }
}
