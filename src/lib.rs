pub mod error;
pub mod inspection;
#[cfg(test)]
pub(crate) mod utils;

use std::io::{self, Write};

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueEnum, builder::ValueHint};

use crate::inspection::{
    NULL_PLACEHOLDER, RenderOptions, ReportFormat, ReportOptions, ReportSummary, inspect,
};

/// File inspected when no path is given.
pub const DEFAULT_FILE: &str = "node_8080_cache.arrow";

/// Print the schema and record batches of an Arrow IPC file.
///
/// Examples:
///   # Inspect the default cache snapshot in the current directory
///   arrow-inspector
///
///   # Inspect a specific file, including its custom metadata
///   arrow-inspector data.arrow --metadata
///
///   # Machine-readable output
///   arrow-inspector data.arrow --format json
#[derive(Parser, Debug)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " ", env!("GIT_HASH")),
    verbatim_doc_comment
)]
pub struct Cli {
    /// Path to the Arrow IPC file
    #[arg(
        value_hint = ValueHint::FilePath,
        env = "ARROW_INSPECTOR_FILE",
        default_value = DEFAULT_FILE
    )]
    pub file: Utf8PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show custom key/value metadata from the schema and footer
    #[arg(long)]
    pub metadata: bool,

    /// Text shown in place of null values
    #[arg(long, default_value = NULL_PLACEHOLDER)]
    pub null_placeholder: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format for the report
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text tables
    #[default]
    Text,
    /// A single JSON document
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Cli {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            format: self.format.into(),
            show_metadata: self.metadata,
            render: RenderOptions {
                null_placeholder: self.null_placeholder.clone(),
            },
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Inspect the file named on the command line and write the report to stdout.
pub fn run(cli: &Cli) -> Result<ReportSummary> {
    if cli.no_color {
        owo_colors::set_override(false);
    }

    let mut out = io::stdout().lock();
    let summary = inspect(cli.file.as_std_path(), &mut out, &cli.report_options())
        .context("Failed to inspect Arrow file")?;
    out.flush()?;

    Ok(summary)
}
