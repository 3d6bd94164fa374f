//! Reference files produced by a live SQL Server through `bcp ... out -n`,
//! and byte-level comparison against locally written files.

pub mod backend;
pub mod compare;
pub mod config;
pub mod error;

pub use backend::{ReferenceBackend, SqlServerOracle};
pub use compare::{Comparison, compare_bytes, compare_files};
pub use config::OracleConfig;
pub use error::OracleError;
