use crate::code_page::CodePage;
use serde::{Deserialize, Serialize};

/// Whether written files are checked against a server-produced reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    #[default]
    Normal,
    /// Also build the table on a live server and export it with `bcp` for a
    /// byte-for-byte comparison.
    Debug,
}

/// Settings shared by every value written to one native file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Code page of the `char`, `varchar` and `text` columns.
    pub code_page: CodePage,
    pub backend: BackendMode,
}

impl WriterConfig {
    pub fn with_code_page(mut self, code_page: CodePage) -> Self {
        self.code_page = code_page;
        self
    }

    pub fn with_backend(mut self, backend: BackendMode) -> Self {
        self.backend = backend;
        self
    }

    pub fn is_debug(&self) -> bool {
        self.backend == BackendMode::Debug
    }
}
