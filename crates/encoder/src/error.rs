use model::{SqlType, ValueKind};
use thiserror::Error;

/// A value that cannot be written for its column type. Nothing is appended to
/// the sink when one of these is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EncodingError {
    #[error("{data_type} column cannot be written from a {found} value")]
    TypeMismatch { data_type: SqlType, found: ValueKind },

    #[error("{data_type} stores {expected} values, got a {found} value")]
    PrecisionMismatch {
        data_type: SqlType,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("value of length {length} exceeds the {max} allowed by {data_type}")]
    ValueTooLong {
        data_type: SqlType,
        length: usize,
        max: usize,
    },

    #[error("{data_type} value contains characters not representable in code page {code_page}")]
    Unmappable { data_type: SqlType, code_page: u16 },

    #[error("{value} is outside the range of {data_type}")]
    OutOfRange { data_type: SqlType, value: String },
}

/// Invalid writer configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported code page: {0}")]
    UnsupportedCodePage(String),
}

/// Errors raised while writing a whole native file.
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row {row}, column {column}: {source}")]
    Encoding {
        row: u64,
        column: usize,
        #[source]
        source: EncodingError,
    },

    #[error("row {row} has {found} values, expected {expected}")]
    ColumnCount {
        row: u64,
        expected: usize,
        found: usize,
    },

    #[error("No columns")]
    NoColumns,
}
