use regex::Regex;

use crate::types::{AvailabilitySlot, TimeSpan};

/// The overlap between one availability slot and one time span.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    pub start_minutes: i32,
    pub end_minutes: i32,
    /// Overlap minutes divided by span minutes, in (0, 1].
    pub ratio: f64,
    /// True when the slot entirely contains the span.
    pub full: bool,
}

/// Parses an HH:MM clock value into a minute-of-day offset (0-1439).
/// Returns `None` for anything that is not a well-formed 24h time.
pub fn parse_clock(value: &str) -> Option<i32> {
    let re = Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").unwrap();
    let caps = re.captures(value.trim())?;
    let hours: i32 = caps[1].parse().ok()?;
    let minutes: i32 = caps[2].parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Renders a minute-of-day offset back to HH:MM.
pub fn format_clock(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Computes the coverage one availability slot provides for one span.
///
/// `None` means no coverage: an unparseable endpoint, a degenerate span,
/// or an empty overlap. This is a signal, not an error — one bad record
/// must not abort a whole week's solve.
pub fn slot_coverage(slot: &AvailabilitySlot, span: &TimeSpan) -> Option<Coverage> {
    let slot_start = parse_clock(&slot.start)?;
    let slot_end = parse_clock(&slot.end)?;
    let span_start = parse_clock(&span.start_time)?;
    let span_end = parse_clock(&span.end_time)?;

    if span_end <= span_start {
        return None;
    }

    let start_minutes = slot_start.max(span_start);
    let end_minutes = slot_end.min(span_end);
    if end_minutes <= start_minutes {
        return None;
    }

    Some(Coverage {
        start_minutes,
        end_minutes,
        ratio: (end_minutes - start_minutes) as f64 / (span_end - span_start) as f64,
        full: slot_start <= span_start && slot_end >= span_end,
    })
}
