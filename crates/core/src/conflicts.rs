//! # Conflict Detector
//!
//! Finds problems in an already proposed schedule. Three independent passes
//! write into one [`ConflictMap`]:
//!
//! 1. **Crew overlap**: two blocks of the same crew overlap in time.
//! 2. **Employee overlap**: two blocks whose crews share at least one member
//!    overlap in time. Every pair is compared, so an overlapping pair on one
//!    crew that lists members is tagged here as well as by pass 1. Only runs
//!    when some crew lists members.
//! 3. **Over capacity**: a crew's hours on one day exceed its daily capacity;
//!    every block contributing to that day is tagged.
//!
//! Overlap passes sort candidates by start and stop scanning forward from a
//! block as soon as a later block starts at or after its end. Only directly
//! overlapping pairs are reported; clusters are not merged.
//!
//! Unassigned blocks and blocks without a well-formed interval never take part.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::capacity::{blocks_by_crew, hours_on_day};
use crate::clock::DATE_FORMAT;
use crate::models::crew::DEFAULT_CAPACITY_HOURS_PER_DAY;
use crate::models::{
    ConflictKind, ConflictMap, ConflictReason, Crew, CrewId, DayWindow, Employee, EmployeeId,
    JobTimeBlock,
};
use crate::overlap::blocks_overlap;

#[derive(Debug, Clone, PartialEq)]
pub struct DetectorOptions {
    /// Run the over-capacity pass.
    pub include_capacity_conflicts: bool,
    /// Capacity of crews that do not declare one.
    pub default_crew_capacity_hours_per_day: f64,
    /// First day checked for over-capacity; derived from the blocks when absent.
    pub window_start: Option<NaiveDate>,
    /// Last day checked for over-capacity (inclusive); derived when absent.
    pub window_end: Option<NaiveDate>,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            include_capacity_conflicts: true,
            default_crew_capacity_hours_per_day: DEFAULT_CAPACITY_HOURS_PER_DAY,
            window_start: None,
            window_end: None,
        }
    }
}

/// Crews known to one detection run: the supplied roster, completed by crews
/// that only appear embedded in blocks.
struct Roster<'a> {
    crews: BTreeMap<CrewId, &'a Crew>,
    employees: BTreeMap<EmployeeId, &'a Employee>,
    default_capacity: f64,
}

impl<'a> Roster<'a> {
    fn new(
        blocks: &'a [JobTimeBlock],
        crews: Option<&'a [Crew]>,
        employees: Option<&'a [Employee]>,
        default_capacity: f64,
    ) -> Self {
        let mut by_id: BTreeMap<CrewId, &'a Crew> = BTreeMap::new();
        for crew in crews.unwrap_or_default() {
            by_id.entry(crew.id).or_insert(crew);
        }
        for block in blocks {
            if let (Some(crew_id), Some(crew)) = (block.crew_id, block.crew.as_ref()) {
                if crew.id == crew_id {
                    by_id.entry(crew_id).or_insert(crew);
                }
            }
        }

        Self {
            crews: by_id,
            employees: employees
                .unwrap_or_default()
                .iter()
                .map(|e| (e.id, e))
                .collect(),
            default_capacity,
        }
    }

    fn name(&self, crew_id: CrewId) -> Cow<'a, str> {
        match self.crews.get(&crew_id) {
            Some(&crew) => Cow::Borrowed(crew.name.as_str()),
            None => Cow::Owned(format!("crew #{crew_id}")),
        }
    }

    fn capacity(&self, crew_id: CrewId) -> f64 {
        self.crews
            .get(&crew_id)
            .map_or(self.default_capacity, |crew| crew.capacity_or(self.default_capacity))
    }

    fn members(&self, crew_id: CrewId) -> Option<&'a BTreeSet<EmployeeId>> {
        self.crews
            .get(&crew_id)
            .copied()
            .and_then(|crew| crew.crew_members.as_ref())
            .filter(|members| !members.is_empty())
    }

    fn declares_members(&self) -> bool {
        self.crews.values().any(|crew| crew.has_members())
    }

    fn employee_name(&self, id: EmployeeId) -> String {
        self.employees
            .get(&id)
            .map_or_else(|| format!("employee #{id}"), |e| e.name.clone())
    }
}

/// Runs every detection pass over one schedule snapshot.
///
/// The result depends only on the inputs: running it twice on the same
/// snapshot yields an identical map. Empty input yields an empty map.
pub fn detect_conflicts(
    blocks: &[JobTimeBlock],
    crews: Option<&[Crew]>,
    employees: Option<&[Employee]>,
    options: &DetectorOptions,
) -> ConflictMap {
    let roster = Roster::new(
        blocks,
        crews,
        employees,
        options.default_crew_capacity_hours_per_day,
    );
    let mut conflicts = ConflictMap::new();

    let crew_tags = detect_crew_overlaps(blocks, &mut conflicts);
    debug!(tags = crew_tags, "crew overlap pass finished");

    if roster.declares_members() {
        let employee_tags = detect_employee_overlaps(blocks, &roster, &mut conflicts);
        debug!(tags = employee_tags, "employee overlap pass finished");
    }

    if options.include_capacity_conflicts {
        let window = DayWindow::resolve(options.window_start, options.window_end, blocks);
        if let Some(window) = window {
            let capacity_tags = detect_over_capacity(blocks, &roster, window, &mut conflicts);
            debug!(tags = capacity_tags, days = window.len(), "over-capacity pass finished");
        }
    }

    info!(
        blocks = blocks.len(),
        conflicted = conflicts.len(),
        crew_overlaps = conflicts.count_of(ConflictKind::CrewOverlap),
        employee_overlaps = conflicts.count_of(ConflictKind::EmployeeOverlap),
        over_capacity = conflicts.count_of(ConflictKind::OverCapacity),
        "conflict detection finished"
    );
    conflicts
}

fn sort_by_start(blocks: &mut [&JobTimeBlock]) {
    blocks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
}

/// Tags both blocks of every same-crew overlapping pair.
fn detect_crew_overlaps(blocks: &[JobTimeBlock], conflicts: &mut ConflictMap) -> usize {
    let mut tags = 0;
    for mut group in blocks_by_crew(blocks).into_values() {
        sort_by_start(&mut group);
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if b.start >= a.end {
                    break;
                }
                if blocks_overlap(a, b) {
                    tags += tag_pair(conflicts, ConflictKind::CrewOverlap, a, b, |other| {
                        format!("overlaps {}", other.id)
                    });
                }
            }
        }
    }
    tags
}

/// Tags both blocks of every overlapping pair whose crews share at least one
/// member. A crew with members always shares them with itself.
fn detect_employee_overlaps(
    blocks: &[JobTimeBlock],
    roster: &Roster<'_>,
    conflicts: &mut ConflictMap,
) -> usize {
    let mut candidates: Vec<(&JobTimeBlock, &BTreeSet<EmployeeId>)> = blocks
        .iter()
        .filter_map(|block| {
            let members = roster.members(block.scheduled_crew()?)?;
            Some((block, members))
        })
        .collect();
    candidates.sort_by(|(a, _), (b, _)| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    let mut tags = 0;
    for (i, (a, a_members)) in candidates.iter().enumerate() {
        for (b, b_members) in &candidates[i + 1..] {
            if b.start >= a.end {
                break;
            }
            if !blocks_overlap(a, b) {
                continue;
            }
            let shared: Vec<EmployeeId> = a_members.intersection(b_members).copied().collect();
            if shared.is_empty() {
                continue;
            }
            let names = shared
                .iter()
                .map(|id| roster.employee_name(*id))
                .collect::<Vec<_>>()
                .join(", ");
            tags += tag_pair(conflicts, ConflictKind::EmployeeOverlap, a, b, |other| {
                format!("shares {names} with {}", other.id)
            });
        }
    }
    tags
}

/// Tags every block contributing to a crew day whose hours exceed capacity.
fn detect_over_capacity(
    blocks: &[JobTimeBlock],
    roster: &Roster<'_>,
    window: DayWindow,
    conflicts: &mut ConflictMap,
) -> usize {
    let by_crew = blocks_by_crew(blocks);
    let mut crew_ids: Vec<CrewId> = by_crew.keys().copied().collect();
    crew_ids.sort_unstable();

    let mut tags = 0;
    for day in window.days() {
        for crew_id in &crew_ids {
            let contributions: Vec<(&JobTimeBlock, f64)> = by_crew[crew_id]
                .iter()
                .map(|block| (*block, hours_on_day(block, day)))
                .filter(|(_, hours)| *hours > 0.0)
                .collect();
            let scheduled: f64 = contributions.iter().map(|(_, hours)| hours).sum();
            let capacity = roster.capacity(*crew_id);
            if scheduled <= capacity {
                continue;
            }

            let detail = format!(
                "{} on {}: {:.1}h / {}h",
                roster.name(*crew_id),
                day.format(DATE_FORMAT),
                scheduled,
                capacity
            );
            for (block, _) in &contributions {
                if conflicts.add(&block.id, ConflictReason::new(ConflictKind::OverCapacity, detail.clone())) {
                    tags += 1;
                }
            }
        }
    }
    tags
}

fn tag_pair(
    conflicts: &mut ConflictMap,
    kind: ConflictKind,
    a: &JobTimeBlock,
    b: &JobTimeBlock,
    detail: impl Fn(&JobTimeBlock) -> String,
) -> usize {
    let mut tags = 0;
    if conflicts.add(&a.id, ConflictReason::new(kind, detail(b))) {
        tags += 1;
    }
    if conflicts.add(&b.id, ConflictReason::new(kind, detail(a))) {
        tags += 1;
    }
    tags
}
