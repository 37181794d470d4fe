use std::collections::HashMap;

use chrono::NaiveDate;

use crate::coverage::{format_clock, parse_clock};
use crate::model::AssignmentModel;
use crate::solver::SolverOutcome;
use crate::types::{
    CandidateAssignment, GapInterval, ScheduleSolution, ShiftDraft, TimeSpan, UnfilledSlot,
    WeekCapacity, STATUS_AUTO_ASSIGNED,
};

/// Slack absorbed when comparing accumulated coverage against a cap, so
/// exactly-met capacity never reports one spurious unit remaining.
pub const CAPACITY_EPSILON: f64 = 1e-6;

/// Reads solved variable values back into shift records and the
/// unfilled-coverage report for one solve call.
pub struct SolutionTranslator<'a> {
    candidates: &'a [CandidateAssignment],
    capacities: &'a WeekCapacity,
    spans: &'a [TimeSpan],
    days: &'a [NaiveDate],
}

impl<'a> SolutionTranslator<'a> {
    pub fn new(
        candidates: &'a [CandidateAssignment],
        capacities: &'a WeekCapacity,
        spans: &'a [TimeSpan],
        days: &'a [NaiveDate],
    ) -> Self {
        SolutionTranslator {
            candidates,
            capacities,
            spans,
            days,
        }
    }

    pub fn translate(&self, outcome: &SolverOutcome, model: &AssignmentModel) -> ScheduleSolution {
        let mut assignments = Vec::new();
        let mut coverage_totals: HashMap<(NaiveDate, i64), f64> = HashMap::new();
        let mut segments: HashMap<(NaiveDate, i64), Vec<(i32, i32)>> = HashMap::new();

        // 1) Collect selected candidates into shift records, totals and
        //    concrete coverage segments
        if outcome.feasible {
            for variable in &model.variables {
                if !outcome.is_selected(&variable.name) {
                    continue;
                }
                let candidate = &self.candidates[variable.candidate_index];

                assignments.push(ShiftDraft {
                    user_id: candidate.employee_id,
                    date: candidate.day,
                    start_time: candidate.coverage_start.clone(),
                    end_time: candidate.coverage_end.clone(),
                    status: STATUS_AUTO_ASSIGNED.to_string(),
                });

                let key = (candidate.day, candidate.span_id);
                *coverage_totals.entry(key).or_insert(0.0) += candidate.coverage_ratio;

                if let (Some(start), Some(end)) = (
                    parse_clock(&candidate.coverage_start),
                    parse_clock(&candidate.coverage_end),
                ) {
                    segments.entry(key).or_default().push((start, end));
                }
            }
        }

        // 2) Walk segments per (day, span) into gap intervals
        let mut gaps: HashMap<(NaiveDate, i64), Vec<GapInterval>> = HashMap::new();
        for (key, segment_list) in &mut segments {
            let span = if let Some(s) = self.span_by_id(key.1) {
                s
            } else {
                continue;
            };
            segment_list.sort_by_key(|&(start, _)| start);
            gaps.insert(*key, span_gaps(span, segment_list));
        }

        // 3) Assemble the unfilled report over the day universe
        let unfilled = self.unfilled_report(&coverage_totals, &mut gaps);

        ScheduleSolution {
            assignments,
            unfilled,
        }
    }

    fn span_by_id(&self, span_id: i64) -> Option<&TimeSpan> {
        self.spans.iter().find(|s| s.id == span_id)
    }

    fn unfilled_report(
        &self,
        coverage_totals: &HashMap<(NaiveDate, i64), f64>,
        gaps: &mut HashMap<(NaiveDate, i64), Vec<GapInterval>>,
    ) -> Vec<UnfilledSlot> {
        let mut unfilled = Vec::new();

        for &day in self.days {
            for span in self.spans {
                let key = (day, span.id);
                let total = coverage_totals.get(&key).copied().unwrap_or(0.0);
                let span_gaps = gaps.remove(&key).unwrap_or_default();

                let remaining = match self.capacities.span_cap(day, span.id) {
                    Some(cap) => remaining_units(cap, total),
                    None => 0,
                };

                if remaining > 0 || !span_gaps.is_empty() {
                    unfilled.push(UnfilledSlot {
                        day,
                        span_id: span.id,
                        remaining,
                        gaps: span_gaps,
                    });
                }
            }
        }

        unfilled
    }
}

/// Ceiling of unmet capacity, with epsilon slack for solver rounding.
fn remaining_units(cap: f64, total: f64) -> i64 {
    let shortfall = ((cap - total).max(0.0) - CAPACITY_EPSILON).ceil();
    if shortfall > 0.0 {
        shortfall as i64
    } else {
        0
    }
}

/// Tiles `[span start, span end]` against sorted coverage segments,
/// emitting every uncovered sub-interval. Overlapping segments are
/// handled by advancing the cursor to the furthest end seen.
fn span_gaps(span: &TimeSpan, segments: &[(i32, i32)]) -> Vec<GapInterval> {
    let span_start = parse_clock(&span.start_time);
    let span_end = parse_clock(&span.end_time);
    let (span_start, span_end) = match (span_start, span_end) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return Vec::new(),
    };

    let mut gaps = Vec::new();
    let mut cursor = span_start;

    for &(start, end) in segments {
        if start > cursor {
            gaps.push(GapInterval::new(&format_clock(cursor), &format_clock(start)));
        }
        cursor = cursor.max(end);
    }

    if cursor < span_end {
        gaps.push(GapInterval::new(&format_clock(cursor), &format_clock(span_end)));
    }

    gaps
}
