//! # Capacity Aggregator
//!
//! Rolls blocks up into a crew × day grid of scheduled versus available
//! hours. Every crew gets a row for every day of the window, including days
//! with nothing scheduled, so callers can tell "idle" apart from "no data".
//!
//! ## Attribution
//!
//! A block lying entirely inside one day contributes its `planned_hours` to
//! that day. A block crossing a day boundary contributes, to each day, the
//! clock time it actually occupies within that day. Overlapping blocks are
//! not deduplicated: capacity tracks booked effort, not wall-clock occupancy.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock;
use crate::models::crew::DEFAULT_CAPACITY_HOURS_PER_DAY;
use crate::models::{Crew, CrewDayCapacity, CrewId, DayWindow, JobTimeBlock};

#[derive(Debug, Clone, PartialEq)]
pub struct CapacityOptions {
    /// Capacity of crews that do not declare one.
    pub default_crew_capacity_hours_per_day: f64,
    /// First evaluated day; derived from the blocks when absent.
    pub window_start: Option<NaiveDate>,
    /// Last evaluated day (inclusive); derived from the blocks when absent.
    pub window_end: Option<NaiveDate>,
}

impl Default for CapacityOptions {
    fn default() -> Self {
        Self {
            default_crew_capacity_hours_per_day: DEFAULT_CAPACITY_HOURS_PER_DAY,
            window_start: None,
            window_end: None,
        }
    }
}

/// Hours of `block` attributed to `day`.
///
/// Malformed blocks and blocks outside the day contribute nothing.
pub fn hours_on_day(block: &JobTimeBlock, day: NaiveDate) -> f64 {
    if !block.is_well_formed() {
        return 0.0;
    }
    let (day_start, day_end) = clock::day_bounds(day);
    if block.start >= day_start && block.end <= day_end {
        return block.planned_hours;
    }
    let start = block.start.max(day_start);
    let end = block.end.min(day_end);
    if start < end {
        clock::hours_between(start, end)
    } else {
        0.0
    }
}

/// Assigned, well-formed blocks grouped by crew.
pub(crate) fn blocks_by_crew(blocks: &[JobTimeBlock]) -> HashMap<CrewId, Vec<&JobTimeBlock>> {
    let mut groups: HashMap<CrewId, Vec<&JobTimeBlock>> = HashMap::new();
    for block in blocks {
        if let Some(crew_id) = block.scheduled_crew() {
            groups.entry(crew_id).or_default().push(block);
        }
    }
    groups
}

/// Builds the crew × day capacity grid.
///
/// Rows are ordered by day, then by the order of `crews`. With N crews and a
/// D-day window exactly N × D rows are returned. When no window can be
/// resolved (no explicit bounds and no well-formed blocks) the grid is empty.
pub fn aggregate_capacity(
    blocks: &[JobTimeBlock],
    crews: &[Crew],
    options: &CapacityOptions,
) -> Vec<CrewDayCapacity> {
    let Some(window) = DayWindow::resolve(options.window_start, options.window_end, blocks) else {
        return Vec::new();
    };

    let by_crew = blocks_by_crew(blocks);
    let default = options.default_crew_capacity_hours_per_day;
    let mut rows = Vec::with_capacity(crews.len() * window.len());

    for day in window.days() {
        for crew in crews {
            let scheduled = by_crew
                .get(&crew.id)
                .map_or(0.0, |group| group.iter().map(|b| hours_on_day(b, day)).sum());
            rows.push(CrewDayCapacity::new(crew.id, day, crew.capacity_or(default), scheduled));
        }
    }

    debug!(
        crews = crews.len(),
        days = window.len(),
        over = rows.iter().filter(|r| r.over_capacity).count(),
        "aggregated crew capacity"
    );
    rows
}

/// Per-crew totals over a capacity grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewCapacitySummary {
    pub crew_id: CrewId,
    pub days: usize,
    pub capacity_hours: f64,
    pub scheduled_hours: f64,
    pub over_capacity_days: usize,
}

impl CrewCapacitySummary {
    /// Scheduled hours as a fraction of capacity; 0 when there is no capacity.
    pub fn utilization(&self) -> f64 {
        if self.capacity_hours > 0.0 {
            self.scheduled_hours / self.capacity_hours
        } else {
            0.0
        }
    }
}

/// Collapses a grid into one summary per crew, in first-seen order.
pub fn summarize_by_crew(rows: &[CrewDayCapacity]) -> Vec<CrewCapacitySummary> {
    let mut summaries: Vec<CrewCapacitySummary> = Vec::new();
    let mut index: HashMap<CrewId, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.crew_id).or_insert_with(|| {
            summaries.push(CrewCapacitySummary {
                crew_id: row.crew_id,
                days: 0,
                capacity_hours: 0.0,
                scheduled_hours: 0.0,
                over_capacity_days: 0,
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[slot];
        summary.days += 1;
        summary.capacity_hours += row.capacity_hours;
        summary.scheduled_hours += row.scheduled_hours;
        if row.over_capacity {
            summary.over_capacity_days += 1;
        }
    }
    summaries
}
