use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SERVER_VAR: &str = "BCP_ORACLE_SERVER";
pub const USER_VAR: &str = "BCP_ORACLE_USER";
pub const PASSWORD_VAR: &str = "BCP_ORACLE_PASSWORD";
pub const DATABASE_VAR: &str = "BCP_ORACLE_DATABASE";

const DEFAULT_CODE_PAGE: u16 = 1252;

/// Connection and tool settings for the reference server.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OracleConfig {
    pub server: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub table: String,
    pub bcp_program: String,
    pub sqlcmd_program: String,
    /// Appended to the local file name to name the reference file.
    pub suffix: String,
    /// Passed to `bcp -C`; must be the code page the local file was written in.
    pub code_page: u16,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            server: "localhost".to_string(),
            user: "sa".to_string(),
            password: String::new(),
            database: "BCPTest".to_string(),
            table: "BCPTest".to_string(),
            bcp_program: "bcp".to_string(),
            sqlcmd_program: "sqlcmd".to_string(),
            suffix: "BCPTest".to_string(),
            code_page: DEFAULT_CODE_PAGE,
        }
    }
}

impl OracleConfig {
    /// Defaults overridden by the `BCP_ORACLE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_vars(&std::env::vars().collect())
    }

    pub fn with_vars(mut self, vars: &HashMap<String, String>) -> Self {
        let overrides = [
            (SERVER_VAR, &mut self.server),
            (USER_VAR, &mut self.user),
            (PASSWORD_VAR, &mut self.password),
            (DATABASE_VAR, &mut self.database),
        ];
        for (key, field) in overrides {
            if let Some(value) = vars.get(key).filter(|v| !v.is_empty()) {
                *field = value.clone();
            }
        }
        self
    }

    pub fn with_code_page(mut self, code_page: u16) -> Self {
        self.code_page = code_page;
        self
    }
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("table", &self.table)
            .field("bcp_program", &self.bcp_program)
            .field("sqlcmd_program", &self.sqlcmd_program)
            .field("suffix", &self.suffix)
            .field("code_page", &self.code_page)
            .finish()
    }
}
