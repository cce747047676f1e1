//! # Adapter Layer
//!
//! Jobs reach the engine in two shapes that evolved independently:
//!
//! - scheduler jobs ([`RawScheduledJob`]): one calendar date plus optional
//!   `HH:mm` start and end times
//! - forecast jobs ([`RawRangeJob`]): a first and last calendar date plus an
//!   optional hour estimate
//!
//! Both are normalized into [`JobTimeBlock`] values. Block ids carry a source
//! prefix (`sched-` or `fcst-`) so the two feeds can never collide.
//!
//! Adapters never drop a job and never fail. Input that cannot be interpreted
//! becomes a zero-length block, which the engine ignores.

pub mod date_range;
pub mod single_day;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BlockStatus, Client, Crew, CrewId, Job, JobId, JobTimeBlock};

pub use date_range::{RawRangeJob, adapt_range_job};
pub use single_day::{RawScheduledJob, adapt_scheduled_job};

/// A job in either upstream shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RawJob {
    SingleDay(RawScheduledJob),
    DateRange(RawRangeJob),
}

impl RawJob {
    pub fn to_block(&self, default_capacity: f64) -> JobTimeBlock {
        match self {
            RawJob::SingleDay(raw) => adapt_scheduled_job(raw),
            RawJob::DateRange(raw) => adapt_range_job(raw, default_capacity),
        }
    }

    fn client(&self) -> Option<&Client> {
        match self {
            RawJob::SingleDay(raw) => raw.client.as_ref(),
            RawJob::DateRange(raw) => raw.client.as_ref(),
        }
    }

    fn crew(&self) -> Option<&Crew> {
        match self {
            RawJob::SingleDay(raw) => raw.crew.as_ref(),
            RawJob::DateRange(raw) => raw.crew.as_ref(),
        }
    }
}

/// Output of [`adapt_jobs`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdaptedSchedule {
    /// One block per input job, in input order.
    pub blocks: Vec<JobTimeBlock>,
    /// Clients embedded in the jobs, one per id, sorted by id.
    pub clients: Vec<Client>,
    /// Crews embedded in the jobs, one per id, sorted by id.
    pub crews: Vec<Crew>,
}

/// Normalizes a batch of raw jobs. Embedded client and crew records are
/// collected alongside the blocks; the first record seen for an id wins.
pub fn adapt_jobs(jobs: &[RawJob], default_capacity: f64) -> AdaptedSchedule {
    let mut clients = BTreeMap::new();
    let mut crews = BTreeMap::new();
    let mut blocks = Vec::with_capacity(jobs.len());

    for job in jobs {
        if let Some(client) = job.client() {
            clients.entry(client.id).or_insert_with(|| client.clone());
        }
        if let Some(crew) = job.crew() {
            crews.entry(crew.id).or_insert_with(|| crew.clone());
        }
        blocks.push(job.to_block(default_capacity));
    }

    let malformed = blocks.iter().filter(|b| !b.is_well_formed()).count();
    debug!(
        jobs = jobs.len(),
        malformed,
        clients = clients.len(),
        crews = crews.len(),
        "adapted raw jobs"
    );

    AdaptedSchedule {
        blocks,
        clients: clients.into_values().collect(),
        crews: crews.into_values().collect(),
    }
}

/// Upstream feeds use `0` for "no crew".
pub(crate) fn assigned_crew(crew_id: Option<CrewId>) -> Option<CrewId> {
    crew_id.filter(|id| *id != 0)
}

/// Placeholder for a job whose interval could not be interpreted.
pub(crate) fn zero_length_block(
    id: String,
    job_id: JobId,
    crew_id: Option<CrewId>,
    status: BlockStatus,
    job: Job,
) -> JobTimeBlock {
    let instant = NaiveDateTime::default();
    JobTimeBlock {
        id,
        job_id,
        crew_id,
        start: instant,
        end: instant,
        planned_hours: 0.0,
        status,
        notes: None,
        job,
        client: None,
        crew: None,
    }
}
