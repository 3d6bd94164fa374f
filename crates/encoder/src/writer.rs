use crate::{
    code_page::CodePage,
    config::WriterConfig,
    error::WriterError,
    native::ColumnEncoder,
};
use bytes::BytesMut;
use model::{SqlType, Value};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, info};

/// Writes rows of a fixed column layout as a native-format data file.
///
/// The file has no header or trailer: each row is its values in column order,
/// each value encoded by its column's encoder.
pub struct BcpWriter<W: Write> {
    inner: W,
    encoders: Vec<ColumnEncoder>,
    scratch: BytesMut,
    rows_written: u64,
}

impl BcpWriter<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes into it.
    pub fn create(
        path: impl AsRef<Path>,
        columns: Vec<SqlType>,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!("Opened native data file {}", path.display());
        Self::new(BufWriter::new(file), columns, config)
    }
}

impl<W: Write> BcpWriter<W> {
    pub fn new(
        inner: W,
        columns: Vec<SqlType>,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        if columns.is_empty() {
            return Err(WriterError::NoColumns);
        }

        debug!(
            "Native writer for {} columns, code page {}",
            columns.len(),
            config.code_page
        );
        Ok(Self {
            inner,
            encoders: encoders(&columns, config.code_page),
            scratch: BytesMut::new(),
            rows_written: 0,
        })
    }

    pub fn columns(&self) -> Vec<SqlType> {
        self.encoders.iter().map(|e| *e.data_type()).collect()
    }

    /// Encodes a whole row before handing it to the underlying writer, so a
    /// rejected value leaves the output untouched.
    pub fn write_row(&mut self, row: &[Option<Value>]) -> Result<(), WriterError> {
        self.scratch.clear();
        encode_into(&mut self.scratch, &self.encoders, row, self.rows_written)?;
        self.inner.write_all(&self.scratch)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_rows<'a, I>(&mut self, rows: I) -> Result<(), WriterError>
    where
        I: IntoIterator<Item = &'a [Option<Value>]>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, WriterError> {
        self.inner.flush()?;
        info!("Wrote {} rows in native format", self.rows_written);
        Ok(self.inner)
    }
}

/// Encodes one row into memory.
pub fn encode_row(
    columns: &[SqlType],
    row: &[Option<Value>],
    code_page: CodePage,
) -> Result<Vec<u8>, WriterError> {
    if columns.is_empty() {
        return Err(WriterError::NoColumns);
    }
    let mut buf = BytesMut::new();
    encode_into(&mut buf, &encoders(columns, code_page), row, 0)?;
    Ok(buf.to_vec())
}

fn encoders(columns: &[SqlType], code_page: CodePage) -> Vec<ColumnEncoder> {
    columns
        .iter()
        .map(|data_type| ColumnEncoder::new(*data_type, code_page))
        .collect()
}

fn encode_into(
    buf: &mut BytesMut,
    encoders: &[ColumnEncoder],
    row: &[Option<Value>],
    row_index: u64,
) -> Result<(), WriterError> {
    if row.len() != encoders.len() {
        return Err(WriterError::ColumnCount {
            row: row_index,
            expected: encoders.len(),
            found: row.len(),
        });
    }

    for (column, (encoder, value)) in encoders.iter().zip(row).enumerate() {
        encoder
            .write(buf, value.as_ref())
            .map_err(|source| WriterError::Encoding {
                row: row_index,
                column,
                source,
            })?;
    }
    Ok(())
}
