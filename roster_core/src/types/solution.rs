use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status carried by engine-produced shift records.
pub const STATUS_AUTO_ASSIGNED: &str = "auto-assigned";
/// Status reserved for unassigned shifts created by the caller from the
/// unfilled report.
pub const STATUS_OPEN: &str = "open";

/// A transient shift-shaped record handed to the persistence
/// collaborator. The engine never stores these itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDraft {
    pub user_id: i64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

/// A sub-interval of a span left uncovered by any selected assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapInterval {
    pub start_time: String,
    pub end_time: String,
}

impl GapInterval {
    pub fn new(start_time: &str, end_time: &str) -> Self {
        GapInterval {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

/// Unmet capacity for one (day, span) pair after solving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnfilledSlot {
    pub day: NaiveDate,
    pub span_id: i64,
    pub remaining: i64,
    pub gaps: Vec<GapInterval>,
}

/// Output of one solve call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSolution {
    pub assignments: Vec<ShiftDraft>,
    pub unfilled: Vec<UnfilledSlot>,
}

impl ScheduleSolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn assignments_for_day(&self, day: NaiveDate) -> Vec<&ShiftDraft> {
        self.assignments.iter().filter(|s| s.date == day).collect()
    }

    pub fn unfilled_for(&self, day: NaiveDate, span_id: i64) -> Option<&UnfilledSlot> {
        self.unfilled
            .iter()
            .find(|u| u.day == day && u.span_id == span_id)
    }
}
