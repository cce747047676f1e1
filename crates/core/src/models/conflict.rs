use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// Two blocks of the same crew overlap in time.
    CrewOverlap,
    /// Two crews sharing an employee are booked at the same time.
    EmployeeOverlap,
    /// A crew's hours on one day exceed its capacity.
    OverCapacity,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ConflictKind::CrewOverlap => "CREW_OVERLAP",
            ConflictKind::EmployeeOverlap => "EMPLOYEE_OVERLAP",
            ConflictKind::OverCapacity => "OVER_CAPACITY",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictReason {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ConflictReason {
    pub fn new(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    pub fn bare(kind: ConflictKind) -> Self {
        Self { kind, detail: None }
    }
}

/// Block id → reasons, in the order they were detected.
///
/// Built fresh for every detection run. A block without an entry has no
/// conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictMap {
    entries: BTreeMap<String, Vec<ConflictReason>>,
}

impl ConflictMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a reason for a block. Returns `false` when the identical reason
    /// was already recorded for it.
    pub fn add(&mut self, block_id: &str, reason: ConflictReason) -> bool {
        let reasons = self.entries.entry(block_id.to_string()).or_default();
        if reasons.contains(&reason) {
            return false;
        }
        reasons.push(reason);
        true
    }

    pub fn get(&self, block_id: &str) -> Option<&[ConflictReason]> {
        self.entries.get(block_id).map(Vec::as_slice)
    }

    pub fn has_kind(&self, block_id: &str, kind: ConflictKind) -> bool {
        self.get(block_id)
            .is_some_and(|reasons| reasons.iter().any(|r| r.kind == kind))
    }

    /// Number of blocks carrying at least one reason of `kind`.
    pub fn count_of(&self, kind: ConflictKind) -> usize {
        self.entries
            .values()
            .filter(|reasons| reasons.iter().any(|r| r.kind == kind))
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ConflictReason])> {
        self.entries
            .iter()
            .map(|(id, reasons)| (id.as_str(), reasons.as_slice()))
    }
}
