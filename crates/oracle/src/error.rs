use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external tool is not installed or not on `PATH`.
    #[error("Program not found: {0}")]
    ProgramNotFound(String),

    #[error("{program} exited with {status}: {stderr}")]
    ProcessFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("No columns")]
    NoColumns,

    /// The server stores an unscaled `datetime2` at scale 7, while the local
    /// file keeps each value's own scale, so the files cannot match.
    #[error("Column {column} is datetime2 without a scale; declare datetime2(n) to compare")]
    UnscaledDateTime2 { column: usize },
}
