use std::fs;
use std::path::Path;

use crewsync_core::errors::ScheduleResult;
use crewsync_core::models::{Crew, Employee};
use crewsync_core::RawJob;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Everything one fetch cycle hands to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub jobs: Vec<RawJob>,
    #[serde(default)]
    pub crews: Vec<Crew>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&json).wrap_err_with(|| format!("Failed to parse snapshot {}", path.display()))
    }
}
