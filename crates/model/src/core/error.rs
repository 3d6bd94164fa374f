use thiserror::Error;

/// Invalid column type parameters, reported when a descriptor is built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("float mantissa width must be between 1 and 53 bits, got {0}")]
    InvalidFloatBits(u32),

    #[error("declared length must be between 1 and {max}, got {length}")]
    InvalidLength { length: u32, max: u16 },

    #[error("fractional-second scale must be between 0 and 7, got {0}")]
    InvalidScale(u32),

    #[error("Unknown column type: {0}")]
    UnknownType(String),
}

/// Malformed textual input handed to a conversion helper.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("hex string has odd length {0}")]
    OddLength(usize),

    #[error("invalid hex digit {found:?} at position {position}")]
    InvalidHexDigit { position: usize, found: char },

    #[error("invalid XML document: {0}")]
    Xml(String),

    #[error("XML document has no root element")]
    MissingRoot,
}

/// A JSON cell that cannot be turned into a value of its column type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    #[error("column {column}: expected {expected}, got JSON {found}")]
    UnexpectedJson {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("column {column}: {value} does not fit")]
    OutOfRange { column: String, value: String },

    #[error("column {column}: cannot parse {value:?}: {reason}")]
    Parse {
        column: String,
        value: String,
        reason: String,
    },

    #[error("column {column}: {source}")]
    Format {
        column: String,
        #[source]
        source: FormatError,
    },
}
