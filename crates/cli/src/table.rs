use crate::error::CliError;
use model::{SqlType, Value};
use serde::Deserialize;
use std::path::Path;

/// Column layout plus rows, as read from a JSON document:
///
/// ```json
/// { "columns": ["nchar(10)", "int"], "rows": [["KIKOO", 10], [null, null]] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TableDocument {
    pub columns: Vec<SqlType>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl TableDocument {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let source = tokio::fs::read_to_string(path).await?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Converts every JSON cell to the value its column expects.
    pub fn values(&self) -> Result<Vec<Vec<Option<Value>>>, CliError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                if cells.len() != self.columns.len() {
                    return Err(CliError::RowWidth {
                        row,
                        expected: self.columns.len(),
                        found: cells.len(),
                    });
                }
                self.columns
                    .iter()
                    .zip(cells)
                    .map(|(data_type, cell)| {
                        Value::from_json(data_type, cell)
                            .map_err(|source| CliError::Conversion { row, source })
                    })
                    .collect()
            })
            .collect()
    }
}
