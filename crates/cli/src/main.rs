use crate::{env::EnvManager, error::CliError, output::WriteReport, table::TableDocument};
use clap::Parser;
use commands::Commands;
use encoder::{BackendMode, BcpWriter, CodePage, WriterConfig};
use oracle::{OracleConfig, ReferenceBackend, SqlServerOracle, compare_files};
use planner::query::{
    ast::common::TableRef, builder::create_table::CreateTableBuilder, dialect::SqlServer,
    renderer::render,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod output;
mod table;

#[derive(Parser)]
#[command(
    name = "bcpgen",
    version = "0.1.0",
    about = "Writes SQL Server native bulk-copy data files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Write {
            table,
            output,
            code_page,
            debug,
            env_file,
        } => {
            let mut config = WriterConfig::default();
            if let Some(number) = code_page {
                config = config.with_code_page(CodePage::from_number(number)?);
            }
            if debug {
                config = config.with_backend(BackendMode::Debug);
            }

            let report = write(&table, &output, config, env_file.as_deref()).await?;
            output::print_report(&report)?;
        }
        Commands::Schema { table, name } => {
            let doc = TableDocument::load(&table).await?;
            let create_table = CreateTableBuilder::new(TableRef {
                schema: None,
                name,
            })
            .numbered_columns(&doc.columns)
            .build();
            println!("{}", render(&create_table, &SqlServer));
        }
        Commands::Compare { left, right } => {
            let comparison = compare_files(Path::new(&left), Path::new(&right)).await?;
            println!("{comparison}");
            if !comparison.is_identical() {
                return Err(CliError::Mismatch(comparison.to_string()));
            }
        }
    }

    Ok(())
}

async fn write(
    table: &str,
    output: &str,
    config: WriterConfig,
    env_file: Option<&str>,
) -> Result<WriteReport, CliError> {
    let doc = TableDocument::load(table).await?;
    let rows = doc.values()?;
    info!("Loaded {} rows from {}", rows.len(), table);

    let mut writer = BcpWriter::create(output, doc.columns.clone(), config)?;
    writer.write_rows(rows.iter().map(Vec::as_slice))?;
    let rows_written = writer.rows_written();
    writer.finish()?;

    let report = WriteReport {
        output: output.to_string(),
        columns: doc.columns.clone(),
        rows: rows_written,
        code_page: config.code_page.number(),
        reference: None,
        comparison: None,
    };
    if !config.is_debug() {
        return Ok(report);
    }

    let mut env = EnvManager::new();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }
    let oracle = SqlServerOracle::new(
        OracleConfig::default()
            .with_vars(env.all())
            .with_code_page(config.code_page.number()),
    );

    let written = Path::new(output);
    let comparison = oracle.verify(&doc.columns, &rows, written).await?;
    let reference = oracle.reference_path(written).display().to_string();
    if !comparison.is_identical() {
        warn!("{} and {}: {}", output, reference, comparison);
        return Err(CliError::Mismatch(comparison.to_string()));
    }
    Ok(report.with_comparison(reference, &comparison))
}
