pub mod analyze;
pub mod config;
pub mod inspect;
pub mod taxonomy;
pub mod validate;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use qbmigrate::importer::FileFormat;
use qbmigrate::models::{ParsedData, RecordKind};
use qbmigrate::settings::Settings;
use qbmigrate::{parse, MigrateError};

#[derive(Parser)]
#[command(
    name = "qbmigrate",
    version,
    about = "Analyze QuickBooks Desktop exports (CSV/IIF) ahead of a migration."
)]
pub struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct InputArgs {
    /// Path to a QuickBooks CSV or IIF export
    pub file: PathBuf,
    /// Export format: csv or iif (default: detect from extension/content)
    #[arg(long)]
    pub format: Option<String>,
    /// Record kind held by a CSV file: accounts, customers, vendors, items,
    /// transactions (default: infer from headers)
    #[arg(long)]
    pub kind: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an export and print the migration report.
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check an export for integrity problems; exits non-zero when any are found.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Show parsed records as tables.
    Inspect {
        #[command(flatten)]
        input: InputArgs,
        /// Maximum rows shown per record kind
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Print the account and item type mapping tables.
    Taxonomy,
    /// View or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate a shell completion script.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print current settings and where they are stored.
    Show,
    /// Change a setting: csv_splitting, output, company_name, fiscal_year_start.
    Set { key: String, value: String },
}

/// Read and parse the file named by `input` using the saved settings.
pub(crate) fn load_input(input: &InputArgs, settings: &Settings) -> anyhow::Result<ParsedData> {
    let text = std::fs::read_to_string(&input.file)
        .with_context(|| format!("could not read {}", input.file.display()))?;

    let format = match &input.format {
        Some(key) => FileFormat::from_key(key)?,
        None => FileFormat::detect(Some(&input.file), &text).ok_or_else(|| {
            MigrateError::UnknownFormat(format!(
                "cannot tell whether {} is CSV or IIF; pass --format",
                input.file.display()
            ))
        })?,
    };
    let kind = input
        .kind
        .as_deref()
        .map(|k| RecordKind::from_key(k).ok_or_else(|| MigrateError::UnknownKind(k.to_string())))
        .transpose()?;

    debug!(file = %input.file.display(), format = format.key(), "loading export");
    let data = parse(&text, format, kind, &settings.parse_options())
        .with_context(|| format!("{} could not be parsed", input.file.display()))?;
    Ok(data)
}
