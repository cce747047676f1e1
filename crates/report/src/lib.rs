//! # CrewSync Report
//!
//! Runs the scheduling engine over a JSON snapshot and formats the result.
//!
//! - **Config**: environment configuration for a report run
//! - **Snapshot**: the raw jobs, crews and employees of one fetch cycle
//! - **Render**: builds the report and formats it as text or JSON

/// Environment configuration
pub mod config;
/// Report building and formatting
pub mod render;
/// Snapshot loading
pub mod snapshot;

use eyre::Result;
use tracing::info;

use config::{OutputFormat, ReportConfig};
use render::build_report;
use snapshot::Snapshot;

/// Loads the configured snapshot and returns the formatted report.
pub fn run(config: &ReportConfig) -> Result<String> {
    info!("Loading snapshot from {}", config.snapshot_path.display());
    let snapshot = Snapshot::load(&config.snapshot_path)?;
    let report = build_report(&snapshot, config);

    match config.format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => report.to_json(),
    }
}
