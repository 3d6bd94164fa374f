use encoder::{ConfigError, WriterError};
use model::ConversionError;
use oracle::OracleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the table document: {0}")]
    TableDeserialize(#[from] serde_json::Error),

    #[error("Row {row}: {source}")]
    Conversion {
        row: usize,
        #[source]
        source: ConversionError,
    },

    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    CodePage(#[from] ConfigError),

    #[error("Failed to write the data file: {0}")]
    Writer(#[from] WriterError),

    #[error("Reference export failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("Files differ: {0}")]
    Mismatch(String),
}
