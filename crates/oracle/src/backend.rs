use crate::{
    compare::{Comparison, compare_files},
    config::OracleConfig,
    error::OracleError,
};
use async_trait::async_trait;
use model::{SqlType, Value};
use planner::{query::dialect::SqlServer, script::ReferenceScript};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Output,
};
use tokio::process::Command;
use tracing::{debug, error, info};

/// Produces the server's own native file for a set of rows.
#[async_trait]
pub trait ReferenceBackend: Send + Sync {
    /// Loads `rows` into a fresh table and exports it next to `target`.
    /// Returns the path of the exported file.
    async fn export(
        &self,
        columns: &[SqlType],
        rows: &[Vec<Option<Value>>],
        target: &Path,
    ) -> Result<PathBuf, OracleError>;

    /// Exports the reference file for `rows` and compares it with `written`.
    async fn verify(
        &self,
        columns: &[SqlType],
        rows: &[Vec<Option<Value>>],
        written: &Path,
    ) -> Result<Comparison, OracleError> {
        let reference = self.export(columns, rows, written).await?;
        compare_files(written, &reference).await
    }
}

/// Uses `sqlcmd` to build the table and `bcp ... out -n` to export it.
#[derive(Debug, Clone)]
pub struct SqlServerOracle {
    config: OracleConfig,
}

impl SqlServerOracle {
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// `<target>.<suffix>`, the file `bcp` writes for `target`.
    pub fn reference_path(&self, target: &Path) -> PathBuf {
        let mut name = target.as_os_str().to_owned();
        name.push(".");
        name.push(&self.config.suffix);
        PathBuf::from(name)
    }

    pub fn script(&self, columns: &[SqlType], rows: &[Vec<Option<Value>>]) -> ReferenceScript {
        ReferenceScript::new(
            &SqlServer,
            &self.config.database,
            &self.config.table,
            columns,
            rows,
        )
    }

    fn sqlcmd_args(&self, script: &Path) -> Vec<String> {
        vec![
            "-S".to_string(),
            self.config.server.clone(),
            "-U".to_string(),
            self.config.user.clone(),
            "-P".to_string(),
            self.config.password.clone(),
            "-b".to_string(),
            "-i".to_string(),
            script.display().to_string(),
        ]
    }

    fn bcp_args(&self, reference: &Path) -> Vec<String> {
        vec![
            format!("[{}].[dbo].[{}]", self.config.database, self.config.table),
            "out".to_string(),
            reference.display().to_string(),
            "-S".to_string(),
            self.config.server.clone(),
            "-U".to_string(),
            self.config.user.clone(),
            "-P".to_string(),
            self.config.password.clone(),
            "-n".to_string(),
            "-C".to_string(),
            self.config.code_page.to_string(),
        ]
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<Output, OracleError> {
        debug!("Running {} {}", program, redact(args).join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => OracleError::ProgramNotFound(program.to_string()),
                _ => OracleError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            error!("{} failed with {}", program, output.status);
            return Err(OracleError::ProcessFailed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: format!("{}\n{}", stderr.trim(), stdout.trim())
                    .trim()
                    .to_string(),
            });
        }

        debug!("{} finished with {}", program, output.status);
        Ok(output)
    }
}

#[async_trait]
impl ReferenceBackend for SqlServerOracle {
    async fn export(
        &self,
        columns: &[SqlType],
        rows: &[Vec<Option<Value>>],
        target: &Path,
    ) -> Result<PathBuf, OracleError> {
        if columns.is_empty() {
            return Err(OracleError::NoColumns);
        }
        if let Some(column) = columns.iter().position(|c| *c == SqlType::DateTime2(None)) {
            return Err(OracleError::UnscaledDateTime2 { column });
        }

        let reference = self.reference_path(target);
        let mut script_path = reference.clone().into_os_string();
        script_path.push(".sql");
        let script_path = PathBuf::from(script_path);

        tokio::fs::write(&script_path, self.script(columns, rows).to_sql()).await?;
        info!(
            "Loading {} rows into [{}].[{}] on {}",
            rows.len(),
            self.config.database,
            self.config.table,
            self.config.server
        );
        self.run(&self.config.sqlcmd_program, &self.sqlcmd_args(&script_path))
            .await?;

        self.run(&self.config.bcp_program, &self.bcp_args(&reference))
            .await?;
        info!("Exported reference file {}", reference.display());

        Ok(reference)
    }
}

/// Arguments with the value following `-P` masked.
fn redact(args: &[String]) -> Vec<&str> {
    let mut redacted = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        redacted.push(if hide_next { "***" } else { arg.as_str() });
        hide_next = arg == "-P";
    }
    redacted
}
