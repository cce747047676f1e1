use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CrewId, EmployeeId};

/// Crew capacity used when a crew does not declare one.
pub const DEFAULT_CAPACITY_HOURS_PER_DAY: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    pub id: CrewId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_hours_per_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_members: Option<BTreeSet<EmployeeId>>,
}

impl Crew {
    /// Daily capacity of this crew, or `default` when none is declared.
    ///
    /// A declared capacity that is not a positive finite number is ignored.
    pub fn capacity_or(&self, default: f64) -> f64 {
        match self.capacity_hours_per_day {
            Some(hours) if hours.is_finite() && hours > 0.0 => hours,
            _ => default,
        }
    }

    /// Whether the crew lists at least one member.
    pub fn has_members(&self) -> bool {
        self.crew_members
            .as_ref()
            .is_some_and(|members| !members.is_empty())
    }
}
