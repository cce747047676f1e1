//! Interval intersection test shared by every overlap-based pass.

use crate::models::JobTimeBlock;

/// Whether the half-open intervals `[a_start, a_end)` and `[b_start, b_end)`
/// share at least one instant.
///
/// Intervals that merely touch (`a_end == b_start`) do not overlap. Values
/// without a total order, such as `f64::NAN`, compare false and therefore
/// never overlap.
#[inline]
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// Overlap of two blocks. Blocks without a well-formed interval never overlap
/// anything.
pub fn blocks_overlap(a: &JobTimeBlock, b: &JobTimeBlock) -> bool {
    a.is_well_formed() && b.is_well_formed() && overlaps(a.start, a.end, b.start, b.end)
}
