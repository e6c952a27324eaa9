//! # Report Output
//!
//! Every subcommand produces a report value. The global `--format` flag
//! decides whether it is printed as human-readable text or as JSON.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format for subcommand reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// A subcommand result that can be printed in either format.
pub trait Report: Serialize {
    /// Text rendering, without a trailing newline.
    fn to_text(&self) -> String;
}

/// Render `report` in `format`.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report as JSON")
        }
    }
}

/// Print `report` to stdout in `format`.
pub fn emit<R: Report>(report: &R, format: OutputFormat) -> Result<()> {
    println!("{}", render(report, format)?);
    Ok(())
}
