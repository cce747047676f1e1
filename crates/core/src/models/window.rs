use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::JobTimeBlock;
use crate::clock;
use crate::errors::{ScheduleError, ScheduleResult};

/// Inclusive range of calendar days evaluated by the capacity passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DayWindow {
    pub fn new(first: NaiveDate, last: NaiveDate) -> ScheduleResult<Self> {
        if last < first {
            return Err(ScheduleError::Validation(format!(
                "window ends ({last}) before it starts ({first})"
            )));
        }
        Ok(Self { first, last })
    }

    /// Smallest window covering every well-formed block, from the earliest
    /// start to the latest end. `None` when no block is well formed.
    pub fn spanning(blocks: &[JobTimeBlock]) -> Option<Self> {
        let mut well_formed = blocks.iter().filter(|b| b.is_well_formed());
        let head = well_formed.next()?;
        let (first, last) = well_formed.fold((head.start, head.end), |(lo, hi), b| {
            (lo.min(b.start), hi.max(b.end))
        });
        Some(Self {
            first: first.date(),
            last: clock::last_occupied_day(last).max(first.date()),
        })
    }

    /// Window from optional explicit bounds, filling missing ones from the
    /// blocks. Returns `None` when a bound is missing and there is nothing to
    /// derive it from, or when the resulting range is empty.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        blocks: &[JobTimeBlock],
    ) -> Option<Self> {
        let (first, last) = match (start, end) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                let derived = Self::spanning(blocks)?;
                (start.unwrap_or(derived.first), end.unwrap_or(derived.last))
            }
        };
        Self::new(first, last).ok()
    }

    pub fn len(&self) -> usize {
        usize::try_from(clock::days_spanned(self.first, self.last)).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        let first = Some(self.first).filter(|first| *first <= last);
        std::iter::successors(first, move |day| day.succ_opt().filter(|next| *next <= last))
    }
}
