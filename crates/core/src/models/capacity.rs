use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CrewId;

/// Scheduled versus available hours for one crew on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewDayCapacity {
    pub crew_id: CrewId,
    pub date: NaiveDate,
    pub capacity_hours: f64,
    pub scheduled_hours: f64,
    pub over_capacity: bool,
}

impl CrewDayCapacity {
    pub fn new(crew_id: CrewId, date: NaiveDate, capacity_hours: f64, scheduled_hours: f64) -> Self {
        Self {
            crew_id,
            date,
            capacity_hours,
            scheduled_hours,
            over_capacity: scheduled_hours > capacity_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(8.0, 8.0, false)]
    #[case(8.01, 8.0, true)]
    #[case(0.0, 8.0, false)]
    #[case(10.0, 8.0, true)]
    fn test_over_capacity_is_strict(#[case] scheduled: f64, #[case] capacity: f64, #[case] over: bool) {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(CrewDayCapacity::new(1, date, capacity, scheduled).over_capacity, over);
    }
}
