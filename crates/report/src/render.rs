//! Builds and formats the conflict and capacity report for one snapshot.

use std::collections::HashMap;
use std::fmt;

use crewsync_core::capacity::CrewCapacitySummary;
use crewsync_core::models::{ConflictMap, Crew, CrewDayCapacity, CrewId, JobTimeBlock};
use crewsync_core::{adapt_jobs, aggregate_capacity, detect_conflicts, summarize_by_crew};
use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::snapshot::Snapshot;

/// Engine results for one snapshot.
#[derive(Debug, Clone)]
pub struct Report {
    pub blocks: Vec<JobTimeBlock>,
    /// Snapshot crews followed by crews only found embedded in jobs.
    pub crews: Vec<Crew>,
    pub conflicts: ConflictMap,
    pub capacity: Vec<CrewDayCapacity>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    conflicts: &'a ConflictMap,
    capacity: &'a [CrewDayCapacity],
    crew_totals: Vec<CrewCapacitySummary>,
}

pub fn build_report(snapshot: &Snapshot, config: &ReportConfig) -> Report {
    let adapted = adapt_jobs(&snapshot.jobs, config.default_capacity_hours);

    let mut crews = snapshot.crews.clone();
    for crew in adapted.crews {
        if !crews.iter().any(|c| c.id == crew.id) {
            crews.push(crew);
        }
    }
    for crew in &crews {
        if let Some(hours) = crew.capacity_hours_per_day {
            if !(hours.is_finite() && hours > 0.0) {
                warn!(crew_id = crew.id, hours, "ignoring non-positive crew capacity");
            }
        }
    }

    let conflicts = detect_conflicts(
        &adapted.blocks,
        Some(crews.as_slice()),
        Some(snapshot.employees.as_slice()),
        &config.detector_options(),
    );
    let capacity = aggregate_capacity(&adapted.blocks, &crews, &config.capacity_options());

    info!(
        jobs = snapshot.jobs.len(),
        crews = crews.len(),
        conflicted_blocks = conflicts.len(),
        capacity_rows = capacity.len(),
        "report built"
    );

    Report {
        blocks: adapted.blocks,
        crews,
        conflicts,
        capacity,
    }
}

impl Report {
    fn crew_names(&self) -> HashMap<CrewId, &str> {
        self.crews.iter().map(|c| (c.id, c.name.as_str())).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            conflicts: &self.conflicts,
            capacity: &self.capacity,
            crew_totals: summarize_by_crew(&self.capacity),
        };
        serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.crew_names();
        let name_of = |id: CrewId| names.get(&id).copied().unwrap_or("?");

        writeln!(
            f,
            "Conflicts: {} of {} blocks",
            self.conflicts.len(),
            self.blocks.len()
        )?;
        for (block_id, reasons) in self.conflicts.iter() {
            for reason in reasons {
                writeln!(
                    f,
                    "  {:<12} {:<17} {}",
                    block_id,
                    reason.kind,
                    reason.detail.as_deref().unwrap_or("")
                )?;
            }
        }

        writeln!(f, "Capacity")?;
        for row in &self.capacity {
            writeln!(
                f,
                "  {}  {:<16} {:>5.1}h / {:>4.1}h{}",
                row.date,
                name_of(row.crew_id),
                row.scheduled_hours,
                row.capacity_hours,
                if row.over_capacity { "  OVER" } else { "" }
            )?;
        }

        writeln!(f, "Crew totals")?;
        for summary in summarize_by_crew(&self.capacity) {
            writeln!(
                f,
                "  {:<16} {:.1}h of {:.1}h ({:.0}%), {} day(s) over",
                name_of(summary.crew_id),
                summary.scheduled_hours,
                summary.capacity_hours,
                summary.utilization() * 100.0,
                summary.over_capacity_days
            )?;
        }
        Ok(())
    }
}
