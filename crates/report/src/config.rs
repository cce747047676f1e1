//! # Report Configuration
//!
//! Settings for one report run, read from environment variables:
//!
//! - `CREWSYNC_SNAPSHOT`: path of the JSON snapshot to evaluate (required)
//! - `CREWSYNC_DEFAULT_CAPACITY_HOURS`: capacity of crews that declare none (default: 8)
//! - `CREWSYNC_INCLUDE_CAPACITY_CONFLICTS`: run the over-capacity pass (default: true)
//! - `CREWSYNC_WINDOW_START` / `CREWSYNC_WINDOW_END`: evaluated days, `yyyy-MM-dd`
//!   (default: derived from the scheduled blocks)
//! - `CREWSYNC_FORMAT`: `text` or `json` (default: text)
//! - `LOG_LEVEL`: logging level (default: "info")

use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use crewsync_core::clock::parse_date;
use crewsync_core::models::crew::DEFAULT_CAPACITY_HOURS_PER_DAY;
use crewsync_core::{CapacityOptions, DetectorOptions};
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for a single report run.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use crewsync_report::config::ReportConfig;
///
/// fn example() -> Result<()> {
///     let config = ReportConfig::from_env()?;
///     println!("Evaluating {}", config.snapshot_path.display());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// JSON snapshot with raw jobs, crews and employees
    pub snapshot_path: PathBuf,

    /// Log level for the application
    pub log_level: Level,

    /// Capacity assumed for crews without `capacityHoursPerDay`
    pub default_capacity_hours: f64,

    /// Whether over-capacity conflicts are reported
    pub include_capacity_conflicts: bool,

    /// First evaluated day
    pub window_start: Option<NaiveDate>,

    /// Last evaluated day (inclusive)
    pub window_end: Option<NaiveDate>,

    /// Output format
    pub format: OutputFormat,
}

impl ReportConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `CREWSYNC_SNAPSHOT` is not set
    /// - `CREWSYNC_DEFAULT_CAPACITY_HOURS` is not a positive number
    /// - a window bound is not a `yyyy-MM-dd` date, or the window is inverted
    /// - `CREWSYNC_FORMAT` or `CREWSYNC_INCLUDE_CAPACITY_CONFLICTS` has an unknown value
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ReportConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let snapshot_path = lookup("CREWSYNC_SNAPSHOT")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("CREWSYNC_SNAPSHOT environment variable must be set"))?;

        let default_capacity_hours = match lookup("CREWSYNC_DEFAULT_CAPACITY_HOURS") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .wrap_err("Invalid CREWSYNC_DEFAULT_CAPACITY_HOURS value")?,
            None => DEFAULT_CAPACITY_HOURS_PER_DAY,
        };
        if !(default_capacity_hours.is_finite() && default_capacity_hours > 0.0) {
            return Err(eyre!(
                "CREWSYNC_DEFAULT_CAPACITY_HOURS must be positive, got {default_capacity_hours}"
            ));
        }

        let include_capacity_conflicts = match lookup("CREWSYNC_INCLUDE_CAPACITY_CONFLICTS")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(eyre!("Invalid CREWSYNC_INCLUDE_CAPACITY_CONFLICTS value: {other}"));
            }
        };

        let window_start = optional_date(&lookup, "CREWSYNC_WINDOW_START")?;
        let window_end = optional_date(&lookup, "CREWSYNC_WINDOW_END")?;
        if let (Some(start), Some(end)) = (window_start, window_end) {
            crewsync_core::models::DayWindow::new(start, end)
                .wrap_err("Invalid report window")?;
        }

        let format = match lookup("CREWSYNC_FORMAT")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => return Err(eyre!("Invalid CREWSYNC_FORMAT value: {other}")),
        };

        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            snapshot_path,
            log_level,
            default_capacity_hours,
            include_capacity_conflicts,
            window_start,
            window_end,
            format,
        })
    }

    pub fn detector_options(&self) -> DetectorOptions {
        DetectorOptions {
            include_capacity_conflicts: self.include_capacity_conflicts,
            default_crew_capacity_hours_per_day: self.default_capacity_hours,
            window_start: self.window_start,
            window_end: self.window_end,
        }
    }

    pub fn capacity_options(&self) -> CapacityOptions {
        CapacityOptions {
            default_crew_capacity_hours_per_day: self.default_capacity_hours,
            window_start: self.window_start,
            window_end: self.window_end,
        }
    }
}

fn optional_date(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<NaiveDate>> {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => parse_date(&value)
            .map(Some)
            .wrap_err_with(|| format!("Invalid {key} value")),
        None => Ok(None),
    }
}
