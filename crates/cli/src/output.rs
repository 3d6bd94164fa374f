use crate::error::CliError;
use model::SqlType;
use oracle::Comparison;
use serde::Serialize;

/// Summary printed after a `write` run.
#[derive(Debug, Serialize)]
pub struct WriteReport {
    pub output: String,
    pub columns: Vec<SqlType>,
    pub rows: u64,
    pub code_page: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

impl WriteReport {
    pub fn with_comparison(mut self, reference: String, comparison: &Comparison) -> Self {
        self.reference = Some(reference);
        self.comparison = Some(comparison.to_string());
        self
    }
}

fn generate_report_json(report: &WriteReport) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn print_report(report: &WriteReport) -> Result<(), CliError> {
    println!("{}", generate_report_json(report)?);
    Ok(())
}
