use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Key applied when no date-specific capacity entry exists.
pub const WILDCARD: &str = "*";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Required headcount for a week, per day and per (day, span).
///
/// Outer keys are `yyyy-MM-dd` dates or the `"*"` wildcard; lookups
/// resolve the date-specific entry first and fall back to the wildcard.
/// Caps are `f64` so a span cap can also be read as a fractional
/// coverage-ratio budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekCapacity {
    #[serde(default)]
    pub per_day: HashMap<String, f64>,
    #[serde(default)]
    pub per_span: HashMap<String, HashMap<i64, f64>>,
}

impl WeekCapacity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a per-day headcount cap; `key` is a date or `"*"`.
    pub fn with_day_cap(mut self, key: &str, cap: f64) -> Self {
        self.per_day.insert(key.to_string(), cap);
        self
    }

    /// Sets a per-(day, span) cap; `key` is a date or `"*"`.
    pub fn with_span_cap(mut self, key: &str, span_id: i64, cap: f64) -> Self {
        self.per_span
            .entry(key.to_string())
            .or_default()
            .insert(span_id, cap);
        self
    }

    pub fn day_cap(&self, day: NaiveDate) -> Option<f64> {
        let key = day.format(DATE_FORMAT).to_string();
        self.per_day
            .get(&key)
            .or_else(|| self.per_day.get(WILDCARD))
            .copied()
    }

    pub fn span_cap(&self, day: NaiveDate, span_id: i64) -> Option<f64> {
        let key = day.format(DATE_FORMAT).to_string();
        self.per_span
            .get(&key)
            .and_then(|caps| caps.get(&span_id))
            .or_else(|| {
                self.per_span
                    .get(WILDCARD)
                    .and_then(|caps| caps.get(&span_id))
            })
            .copied()
    }

    /// Concrete dates named anywhere in the capacity table, parsed and
    /// sorted. Wildcard keys and unparseable keys are ignored.
    pub fn configured_days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        for key in self.per_day.keys().chain(self.per_span.keys()) {
            if let Ok(day) = NaiveDate::parse_from_str(key, DATE_FORMAT) {
                days.push(day);
            }
        }
        days.sort();
        days.dedup();
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_date_entry_overrides_wildcard() {
        let capacity = WeekCapacity::new()
            .with_day_cap(WILDCARD, 5.0)
            .with_day_cap("2024-06-03", 2.0);

        assert_eq!(capacity.day_cap(monday()), Some(2.0));
        // Tuesday has no date entry, falls back to the wildcard
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        assert_eq!(capacity.day_cap(tuesday), Some(5.0));
    }

    #[test]
    fn test_span_cap_wildcard_fallback() {
        let capacity = WeekCapacity::new()
            .with_span_cap(WILDCARD, 1, 3.0)
            .with_span_cap("2024-06-03", 1, 1.0);

        assert_eq!(capacity.span_cap(monday(), 1), Some(1.0));
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        assert_eq!(capacity.span_cap(tuesday, 1), Some(3.0));
        assert_eq!(capacity.span_cap(monday(), 2), None);
    }

    #[test]
    fn test_configured_days_skips_wildcard() {
        let capacity = WeekCapacity::new()
            .with_day_cap(WILDCARD, 5.0)
            .with_day_cap("2024-06-04", 2.0)
            .with_span_cap("2024-06-03", 1, 1.0);

        let days = capacity.configured_days();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "per_day": {"*": 4},
            "per_span": {"2024-06-03": {"1": 1.5}}
        }"#;
        let capacity: WeekCapacity = serde_json::from_str(json).unwrap();
        assert_eq!(capacity.day_cap(monday()), Some(4.0));
        assert_eq!(capacity.span_cap(monday(), 1), Some(1.5));
    }
}
