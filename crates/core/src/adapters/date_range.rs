//! Adapter for forecast jobs that span a range of calendar days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock;
use crate::models::{BlockStatus, Client, ClientId, Crew, CrewId, Job, JobId, JobTimeBlock};

use super::{assigned_crew, zero_length_block};

/// Id prefix of blocks produced by this adapter.
pub const BLOCK_PREFIX: &str = "fcst";

/// Workday assumed for every day of a range job.
pub const WORKDAY_START: (u32, u32) = (8, 0);
pub const WORKDAY_END: (u32, u32) = (17, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRangeJob {
    pub id: JobId,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub crew_id: Option<CrewId>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub crew: Option<Crew>,
}

pub fn block_id(job_id: JobId) -> String {
    format!("{BLOCK_PREFIX}-{job_id}")
}

/// Converts a forecast job into a canonical block.
///
/// The block runs from 08:00 on the first day to 17:00 on the last.
/// `planned_hours` is the job's estimate when it has one; otherwise every
/// spanned day is assumed to use the crew's full capacity, taken from the
/// embedded crew or `default_capacity`.
pub fn adapt_range_job(raw: &RawRangeJob, default_capacity: f64) -> JobTimeBlock {
    let id = block_id(raw.id);
    let job = Job {
        id: raw.id,
        client_id: raw.client_id,
        scope: raw.title.clone(),
        estimated_hours: raw.estimated_hours,
        status: None,
    };
    let crew_id = assigned_crew(raw.crew_id);

    let mut block = match range_days(raw) {
        Some((first, last)) => {
            let capacity = raw
                .crew
                .as_ref()
                .map_or(default_capacity, |crew| crew.capacity_or(default_capacity));
            let planned_hours = match raw.estimated_hours {
                Some(hours) if hours.is_finite() && hours >= 0.0 => hours,
                _ => clock::days_spanned(first, last).max(1) as f64 * capacity,
            };
            JobTimeBlock {
                id,
                job_id: raw.id,
                crew_id,
                start: clock::at(first, clock::hm(WORKDAY_START.0, WORKDAY_START.1)),
                end: clock::at(last, clock::hm(WORKDAY_END.0, WORKDAY_END.1)),
                planned_hours,
                status: BlockStatus::Planned,
                notes: None,
                job,
                client: None,
                crew: None,
            }
        }
        None => zero_length_block(id, raw.id, crew_id, BlockStatus::Planned, job),
    };
    block.client = raw.client.clone();
    block.crew = raw.crew.clone();
    block
}

fn range_days(raw: &RawRangeJob) -> Option<(NaiveDate, NaiveDate)> {
    let first = match clock::parse_date(&raw.start_date) {
        Ok(date) => date,
        Err(e) => {
            warn!(job_id = raw.id, error = %e, "range job has no usable start date");
            return None;
        }
    };

    let last = match raw.end_date.as_deref().filter(|d| !d.trim().is_empty()) {
        None => first,
        Some(value) => match clock::parse_date(value) {
            Ok(date) => date,
            Err(e) => {
                warn!(job_id = raw.id, error = %e, "range job has no usable end date");
                return None;
            }
        },
    };

    if last < first {
        warn!(job_id = raw.id, %first, %last, "range job ends before it starts");
        return None;
    }
    Some((first, last))
}
