use crate::error::OracleError;
use std::{fmt, path::Path};
use tracing::{info, warn};

/// Outcome of a byte-for-byte comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Identical,
    /// First differing offset. When one input is a prefix of the other the
    /// offset is the shorter length.
    Differs {
        offset: usize,
        left_len: usize,
        right_len: usize,
    },
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        matches!(self, Comparison::Identical)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Identical => f.write_str("identical"),
            Comparison::Differs {
                offset,
                left_len,
                right_len,
            } => write!(
                f,
                "differ at byte {offset} (lengths {left_len} and {right_len})"
            ),
        }
    }
}

pub fn compare_bytes(left: &[u8], right: &[u8]) -> Comparison {
    let offset = left
        .iter()
        .zip(right)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| left.len().min(right.len()));

    if offset == left.len() && offset == right.len() {
        Comparison::Identical
    } else {
        Comparison::Differs {
            offset,
            left_len: left.len(),
            right_len: right.len(),
        }
    }
}

pub async fn compare_files(left: &Path, right: &Path) -> Result<Comparison, OracleError> {
    let left_bytes = read(left).await?;
    let right_bytes = read(right).await?;
    let comparison = compare_bytes(&left_bytes, &right_bytes);

    match comparison {
        Comparison::Identical => info!(
            "{} and {} are identical",
            left.display(),
            right.display()
        ),
        Comparison::Differs { .. } => warn!(
            "{} and {} {}",
            left.display(),
            right.display(),
            comparison
        ),
    }
    Ok(comparison)
}

async fn read(path: &Path) -> Result<Vec<u8>, OracleError> {
    tokio::fs::read(path).await.map_err(|source| OracleError::Read {
        path: path.to_path_buf(),
        source,
    })
}
