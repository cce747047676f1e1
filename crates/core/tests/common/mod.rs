#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use crewsync_core::models::{BlockStatus, Crew, Employee, Job, JobTimeBlock};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_hms_opt(h, m, 0).unwrap()
}

pub fn crew(id: i64, name: &str, capacity: Option<f64>, members: &[i64]) -> Crew {
    Crew {
        id,
        name: name.to_string(),
        color: None,
        capacity_hours_per_day: capacity,
        crew_members: if members.is_empty() {
            None
        } else {
            Some(members.iter().copied().collect::<BTreeSet<_>>())
        },
    }
}

pub fn employee(id: i64, name: &str) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        role: None,
    }
}

pub fn block(
    id: &str,
    crew_id: Option<i64>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    planned_hours: f64,
) -> JobTimeBlock {
    JobTimeBlock {
        id: id.to_string(),
        job_id: 1,
        crew_id,
        start,
        end,
        planned_hours,
        status: BlockStatus::Planned,
        notes: None,
        job: Job {
            id: 1,
            client_id: Some(1),
            scope: None,
            estimated_hours: None,
            status: None,
        },
        client: None,
        crew: None,
    }
}

/// Block on 2024-03-04 between two clock times, planned for its duration.
pub fn day_block(id: &str, crew_id: i64, from: (u32, u32), to: (u32, u32)) -> JobTimeBlock {
    let day = date(2024, 3, 4);
    let start = at(day, from.0, from.1);
    let end = at(day, to.0, to.1);
    let hours = (end - start).num_minutes() as f64 / 60.0;
    block(id, Some(crew_id), start, end, hours)
}
