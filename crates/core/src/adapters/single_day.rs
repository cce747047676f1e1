//! Adapter for scheduler jobs: one calendar date with optional clock times.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock;
use crate::models::{BlockStatus, Client, ClientId, Crew, CrewId, Job, JobId, JobTimeBlock};

use super::{assigned_crew, zero_length_block};

/// Id prefix of blocks produced by this adapter.
pub const BLOCK_PREFIX: &str = "sched";

/// Start used when a job has no usable start time.
pub const DEFAULT_START: (u32, u32) = (8, 0);

/// Length assumed when a job has no usable end time.
pub const DEFAULT_DURATION_HOURS: f64 = 4.0;

/// A job as delivered by the scheduler feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduledJob {
    pub id: JobId,
    pub client_id: ClientId,
    #[serde(default)]
    pub crew_id: Option<CrewId>,
    /// `yyyy-MM-dd`
    #[serde(default)]
    pub date: String,
    /// `HH:mm`
    #[serde(default)]
    pub start_time: Option<String>,
    /// `HH:mm`
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub crew: Option<Crew>,
}

pub fn block_id(job_id: JobId) -> String {
    format!("{BLOCK_PREFIX}-{job_id}")
}

/// Maps the feed's status vocabulary onto block status. Unknown or missing
/// values count as planned.
pub fn map_status(status: Option<&str>) -> BlockStatus {
    match status.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("completed") | Some("complete") => BlockStatus::Complete,
        Some("cancelled") | Some("canceled") => BlockStatus::Canceled,
        _ => BlockStatus::Planned,
    }
}

/// Converts a scheduler job into a canonical block.
pub fn adapt_scheduled_job(raw: &RawScheduledJob) -> JobTimeBlock {
    let id = block_id(raw.id);
    let status = map_status(raw.status.as_deref());
    let job = Job {
        id: raw.id,
        client_id: Some(raw.client_id),
        scope: None,
        estimated_hours: None,
        status: raw.status.clone(),
    };

    let mut block = match scheduled_interval(raw) {
        Some((start, end)) => JobTimeBlock {
            id,
            job_id: raw.id,
            crew_id: assigned_crew(raw.crew_id),
            start,
            end,
            planned_hours: clock::hours_between(start, end),
            status,
            notes: None,
            job,
            client: None,
            crew: None,
        },
        None => zero_length_block(id, raw.id, assigned_crew(raw.crew_id), status, job),
    };
    block.notes = raw.notes.clone();
    block.client = raw.client.clone();
    block.crew = raw.crew.clone();
    block
}

fn scheduled_interval(raw: &RawScheduledJob) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let date = match clock::parse_date(&raw.date) {
        Ok(date) => date,
        Err(e) => {
            warn!(job_id = raw.id, error = %e, "scheduled job has no usable date");
            return None;
        }
    };

    let start_time = clock_time(raw.id, "start", raw.start_time.as_deref())
        .unwrap_or_else(|| clock::hm(DEFAULT_START.0, DEFAULT_START.1));
    let start = clock::at(date, start_time);
    let end = match clock_time(raw.id, "end", raw.end_time.as_deref()) {
        Some(end_time) => clock::at(date, end_time),
        None => clock::add_hours(start, DEFAULT_DURATION_HOURS),
    };

    if end <= start {
        warn!(job_id = raw.id, %start, %end, "scheduled job ends before it starts");
        return None;
    }
    Some((start, end))
}

fn clock_time(job_id: JobId, which: &str, value: Option<&str>) -> Option<NaiveTime> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    match clock::parse_time(value) {
        Ok(time) => Some(time),
        Err(e) => {
            warn!(job_id, which, error = %e, "ignoring unparsable clock time");
            None
        }
    }
}
