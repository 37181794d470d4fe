use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A possible (employee, day, span) assignment derived from one
/// availability overlap. Generated fresh per solve and discarded after.
///
/// Invariant: `coverage_ratio > 0` — zero-overlap pairings are never
/// emitted by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAssignment {
    pub employee_id: i64,
    pub day: NaiveDate,
    pub span_id: i64,
    pub coverage_start: String,
    pub coverage_end: String,
    pub coverage_ratio: f64,
    pub full_coverage: bool,
}
