use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One contiguous interval an employee is willing to work on a weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub start: String,
    pub end: String,
}

impl AvailabilitySlot {
    pub fn new(start: &str, end: &str) -> Self {
        AvailabilitySlot {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// One employee's availability for one week, keyed by the English full
/// weekday name ("Monday".."Sunday"). The weekday name is the fixed join
/// key used by candidate generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekAvailability {
    pub employee_id: i64,
    pub week_start: NaiveDate,
    #[serde(default)]
    pub per_weekday: HashMap<String, Vec<AvailabilitySlot>>,
}

impl WeekAvailability {
    pub fn new(employee_id: i64, week_start: NaiveDate) -> Self {
        WeekAvailability {
            employee_id,
            week_start,
            per_weekday: HashMap::new(),
        }
    }

    /// Adds slots for a weekday, appending to any already present.
    pub fn with_day(mut self, weekday: &str, slots: Vec<AvailabilitySlot>) -> Self {
        self.per_weekday
            .entry(weekday.to_string())
            .or_default()
            .extend(slots);
        self
    }

    pub fn slots_for(&self, weekday: &str) -> Option<&Vec<AvailabilitySlot>> {
        self.per_weekday.get(weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_day_appends() {
        let availability = WeekAvailability::new(7, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
            .with_day("Monday", vec![AvailabilitySlot::new("09:00", "12:00")])
            .with_day("Monday", vec![AvailabilitySlot::new("13:00", "17:00")]);

        assert_eq!(availability.slots_for("Monday").unwrap().len(), 2);
        assert!(availability.slots_for("Tuesday").is_none());
    }
}
