use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Client, Crew, CrewId, Job, JobId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    #[default]
    Planned,
    Complete,
    Canceled,
}

/// One scheduled occupation of a crew's time by a job.
///
/// `start` and `end` bound the half-open interval `[start, end)` in local
/// wall-clock time. Adapters emit a zero-length interval for input they could
/// not interpret; such blocks are kept for display but take no part in
/// conflict or capacity math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTimeBlock {
    /// Source-tagged identifier, unique across adapters.
    pub id: String,
    pub job_id: JobId,
    /// `None` when the job has no crew yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_id: Option<CrewId>,
    #[serde(rename = "startDateTime")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDateTime")]
    pub end: NaiveDateTime,
    pub planned_hours: f64,
    #[serde(default)]
    pub status: BlockStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub job: Job,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<Crew>,
}

impl JobTimeBlock {
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Crew id for blocks that take part in crew-scoped passes.
    pub fn scheduled_crew(&self) -> Option<CrewId> {
        if self.is_well_formed() { self.crew_id } else { None }
    }
}
