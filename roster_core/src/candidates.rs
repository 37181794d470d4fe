use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::coverage::{format_clock, slot_coverage};
use crate::types::{CandidateAssignment, TimeSpan, WeekAvailability};

/// The 7 calendar days of the week starting at `week_start`.
pub fn week_days(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| week_start + Duration::days(i)).collect()
}

/// English full weekday name — the fixed join key between calendar days
/// and availability maps.
pub fn weekday_name(day: NaiveDate) -> &'static str {
    match day.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Expands weekly availability against the configured spans into one
/// candidate per (employee, day, span, slot) combination with non-zero
/// coverage.
///
/// Enumeration order is employee, then day, then span, then slot; the
/// model builder's running fairness index accumulates across exactly
/// this traversal. Identical resolved windows for the same
/// (employee, day, span) collapse to a single candidate.
pub fn generate_candidates(
    availabilities: &[WeekAvailability],
    days: &[NaiveDate],
    spans: &[TimeSpan],
) -> Vec<CandidateAssignment> {
    let mut candidates = Vec::new();
    let mut seen: HashSet<(i64, NaiveDate, i64, i32, i32)> = HashSet::new();

    for availability in availabilities {
        for &day in days {
            let slots = if let Some(list) = availability.slots_for(weekday_name(day)) {
                list
            } else {
                continue;
            };

            for span in spans {
                for slot in slots {
                    let coverage = if let Some(c) = slot_coverage(slot, span) {
                        c
                    } else {
                        continue;
                    };

                    let key = (
                        availability.employee_id,
                        day,
                        span.id,
                        coverage.start_minutes,
                        coverage.end_minutes,
                    );
                    if !seen.insert(key) {
                        continue;
                    }

                    candidates.push(CandidateAssignment {
                        employee_id: availability.employee_id,
                        day,
                        span_id: span.id,
                        coverage_start: format_clock(coverage.start_minutes),
                        coverage_end: format_clock(coverage.end_minutes),
                        coverage_ratio: coverage.ratio,
                        full_coverage: coverage.full,
                    });
                }
            }
        }
    }

    candidates
}
