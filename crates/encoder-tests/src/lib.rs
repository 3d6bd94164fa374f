#![allow(dead_code)]

use encoder::{BcpWriter, WriterConfig};
use model::{SqlType, Value};
use oracle::{OracleConfig, SqlServerOracle};
use std::path::{Path, PathBuf};

pub mod integration;
pub mod reference;
pub mod utils;

/// Set to any value to run the tests that need a live server.
const ORACLE_SERVER_VAR: &str = oracle::config::SERVER_VAR;

/// Writes `rows` to `dir/name` and returns the path.
pub fn write_file(
    dir: &Path,
    name: &str,
    columns: &[SqlType],
    rows: &[Vec<Option<Value>>],
    config: WriterConfig,
) -> PathBuf {
    let path = dir.join(name);
    let mut writer = BcpWriter::create(&path, columns.to_vec(), config).expect("create writer");
    writer
        .write_rows(rows.iter().map(Vec::as_slice))
        .expect("write rows");
    writer.finish().expect("flush writer");
    path
}

/// Writes `rows` and reads the whole file back.
pub fn written_bytes(columns: &[SqlType], rows: &[Vec<Option<Value>>]) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), "out.bcp", columns, rows, WriterConfig::default());
    std::fs::read(path).expect("read back")
}

/// Oracle configured from `BCP_ORACLE_*`, or `None` when no server is configured.
pub fn live_oracle() -> Option<SqlServerOracle> {
    std::env::var(ORACLE_SERVER_VAR)
        .ok()
        .map(|_| SqlServerOracle::new(OracleConfig::from_env()))
}
