//! # CrewSync Core
//!
//! Scheduling conflict detection and capacity aggregation for field crews.
//!
//! ## Flow
//!
//! ```text
//! raw jobs ──► adapters ──► JobTimeBlock[] ──┬─► conflicts::detect_conflicts ──► ConflictMap
//!                                            └─► capacity::aggregate_capacity ─► CrewDayCapacity[]
//! ```
//!
//! The engine is synchronous and side-effect free. Every call works on an
//! immutable snapshot and rebuilds its result from scratch; nothing is cached
//! between calls. All timestamps are local wall-clock values without a time
//! zone.

/// Normalizers from the upstream job shapes to canonical blocks
pub mod adapters;
/// Crew × day capacity grid
pub mod capacity;
/// Local date and time helpers
pub mod clock;
/// Crew, employee and capacity conflict detection
pub mod conflicts;
/// Engine error types
pub mod errors;
/// Canonical domain model
pub mod models;
/// Half-open interval intersection
pub mod overlap;

pub use adapters::{AdaptedSchedule, RawJob, RawRangeJob, RawScheduledJob, adapt_jobs};
pub use capacity::{CapacityOptions, CrewCapacitySummary, aggregate_capacity, summarize_by_crew};
pub use conflicts::{DetectorOptions, detect_conflicts};
pub use errors::{ScheduleError, ScheduleResult};
pub use overlap::{blocks_overlap, overlaps};
