//! SQL Server native bulk-copy (`bcp -n`) encoders and file writer.

pub mod code_page;
pub mod config;
pub mod error;
pub mod native;
pub mod sink;
pub mod writer;

pub use model::core::utils;

pub use code_page::CodePage;
pub use config::{BackendMode, WriterConfig};
pub use error::{ConfigError, EncodingError, WriterError};
pub use native::{ColumnEncoder, NativeEncoder};
pub use writer::{BcpWriter, encode_row};
