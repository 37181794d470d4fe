use serde::{Deserialize, Serialize};

use crate::coverage::parse_clock;

/// A named recurring daily shift window, e.g. Morning 06:00-14:00.
///
/// Spans are configured externally and stay immutable for the duration
/// of one solve. `start_time` is assumed to precede `end_time` within a
/// single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSpan {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSpan {
    pub fn new(id: i64, name: &str, start_time: &str, end_time: &str) -> Self {
        TimeSpan {
            id,
            name: name.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// Span length in minutes, or `None` when either endpoint is not a
    /// well-formed HH:MM value or the span is degenerate.
    pub fn duration_minutes(&self) -> Option<i32> {
        let start = parse_clock(&self.start_time)?;
        let end = parse_clock(&self.end_time)?;
        if end <= start {
            return None;
        }
        Some(end - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_minutes() {
        let span = TimeSpan::new(1, "Morning", "06:00", "14:00");
        assert_eq!(span.duration_minutes(), Some(480));
    }

    #[test]
    fn test_duration_rejects_bad_clock() {
        let span = TimeSpan::new(1, "Broken", "6am", "14:00");
        assert_eq!(span.duration_minutes(), None);
    }

    #[test]
    fn test_duration_rejects_reversed_span() {
        let span = TimeSpan::new(1, "Reversed", "14:00", "06:00");
        assert_eq!(span.duration_minutes(), None);
    }
}
