//! CLI interface for crypto-sentinel
//!
//! Provides subcommands for:
//! - `run`: Execute one full ETL run
//! - `score`: Score texts from arguments or stdin
//! - `summary`: Batch statistics for a text set
//! - `config`: Show configuration
//! - `cleanup`: Remove old local reports
//! - `reports`: List and fetch stored reports

mod cleanup;
mod reports;
mod run;
mod score;
mod summary;

pub use cleanup::CleanupArgs;
pub use reports::{ReportsArgs, ReportsCommand};
pub use run::RunArgs;
pub use score::ScoreArgs;
pub use summary::SummaryArgs;

use clap::{Parser, Subcommand};
use std::io::BufRead;

#[derive(Parser, Debug)]
#[command(name = "crypto-sentinel")]
#[command(about = "Bitcoin news sentiment ETL with a crypto-aware scoring engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute one ETL run
    Run(RunArgs),
    /// Score texts given as arguments, or one per stdin line
    Score(ScoreArgs),
    /// Batch statistics for a text set
    Summary(SummaryArgs),
    /// Show configuration
    Config,
    /// Remove local reports past the retention window
    Cleanup(CleanupArgs),
    /// List or fetch reports in the configured store
    Reports(ReportsArgs),
}

/// Non-empty trimmed lines from a reader
fn read_lines(reader: impl BufRead) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}
