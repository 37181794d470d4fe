use std::collections::HashMap;

use chrono::NaiveDate;

use crate::coverage::parse_clock;
use crate::types::{CandidateAssignment, TimeSpan, WeekCapacity};

/// Objective bonus for a candidate whose slot contains the whole span.
pub const FULL_COVERAGE_BONUS: f64 = 0.75;
/// Weight of the running fairness index in the score.
pub const FAIRNESS_WEIGHT: f64 = 0.0025;
/// Every considered candidate adds at least this much to its employee's
/// fairness index.
pub const FAIRNESS_FLOOR: f64 = 0.25;
/// Weight of the assigned-hours penalty in the score.
pub const HOURS_WEIGHT: f64 = 0.001;

/// One 0/1 decision variable. `candidate_index` — not the name — links
/// the variable back to its candidate, so two coverage windows for the
/// same (employee, day, span) can never be conflated.
#[derive(Debug, Clone)]
pub struct ModelVariable {
    pub name: String,
    pub candidate_index: usize,
    pub score: f64,
}

/// A `sum(coeff * var) <= upper` constraint over variable indices.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub label: String,
    pub terms: Vec<(usize, f64)>,
    pub upper: f64,
}

/// Solver-neutral description of one assignment problem: binary
/// variables, `<=` constraints, and a maximizing objective carried as
/// per-variable scores.
#[derive(Debug, Clone, Default)]
pub struct AssignmentModel {
    pub variables: Vec<ModelVariable>,
    pub constraints: Vec<LinearConstraint>,
}

impl AssignmentModel {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Builds the 0/1 integer program for one candidate set.
pub struct AssignmentModelBuilder<'a> {
    candidates: &'a [CandidateAssignment],
    capacities: &'a WeekCapacity,
    span_minutes: HashMap<i64, f64>,
}

impl<'a> AssignmentModelBuilder<'a> {
    pub fn new(
        candidates: &'a [CandidateAssignment],
        capacities: &'a WeekCapacity,
        spans: &'a [TimeSpan],
    ) -> Self {
        let mut span_minutes = HashMap::new();
        for span in spans {
            if let Some(minutes) = span.duration_minutes() {
                span_minutes.insert(span.id, minutes as f64);
            }
        }

        AssignmentModelBuilder {
            candidates,
            capacities,
            span_minutes,
        }
    }

    pub fn build(&self) -> AssignmentModel {
        // 1) One scored binary variable per candidate, in enumeration order
        let variables = self.score_candidates();

        let mut constraints = Vec::new();

        // 2) Employee-day exclusivity: at most one span per employee per day
        let mut by_employee_day: HashMap<(i64, NaiveDate), Vec<usize>> = HashMap::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            by_employee_day
                .entry((candidate.employee_id, candidate.day))
                .or_default()
                .push(index);
        }
        let mut employee_days: Vec<(i64, NaiveDate)> = by_employee_day.keys().copied().collect();
        employee_days.sort();
        for key in employee_days {
            let indices = &by_employee_day[&key];
            constraints.push(LinearConstraint {
                label: format!("employee {} on {}", key.0, key.1),
                terms: indices.iter().map(|&i| (i, 1.0)).collect(),
                upper: 1.0,
            });
        }

        // 3) Day capacity: plain headcount per day, when configured
        let mut by_day: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            by_day.entry(candidate.day).or_default().push(index);
        }
        let mut days: Vec<NaiveDate> = by_day.keys().copied().collect();
        days.sort();
        for day in days {
            let cap = if let Some(cap) = self.capacities.day_cap(day) {
                cap
            } else {
                continue;
            };
            constraints.push(LinearConstraint {
                label: format!("day {}", day),
                terms: by_day[&day].iter().map(|&i| (i, 1.0)).collect(),
                upper: cap,
            });
        }

        // 4) Span capacity: coverage-ratio weighted, when configured
        let mut by_day_span: HashMap<(NaiveDate, i64), Vec<usize>> = HashMap::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            by_day_span
                .entry((candidate.day, candidate.span_id))
                .or_default()
                .push(index);
        }
        let mut day_spans: Vec<(NaiveDate, i64)> = by_day_span.keys().copied().collect();
        day_spans.sort();
        for (day, span_id) in day_spans {
            let cap = if let Some(cap) = self.capacities.span_cap(day, span_id) {
                cap
            } else {
                continue;
            };
            constraints.push(LinearConstraint {
                label: format!("span {} on {}", span_id, day),
                terms: by_day_span[&(day, span_id)]
                    .iter()
                    .map(|&i| (i, self.candidates[i].coverage_ratio))
                    .collect(),
                upper: cap,
            });
        }

        AssignmentModel {
            variables,
            constraints,
        }
    }

    /// Scores candidates in input order, accumulating the running
    /// fairness index per employee across that traversal.
    fn score_candidates(&self) -> Vec<ModelVariable> {
        let mut variables = Vec::with_capacity(self.candidates.len());
        let mut fairness: HashMap<i64, f64> = HashMap::new();
        let mut window_counts: HashMap<(i64, NaiveDate, i64), usize> = HashMap::new();

        for (index, candidate) in self.candidates.iter().enumerate() {
            let fairness_index = fairness.entry(candidate.employee_id).or_insert(0.0);
            let fairness_penalty = *fairness_index * FAIRNESS_WEIGHT;
            let hours_penalty =
                self.candidate_span_minutes(candidate) * candidate.coverage_ratio / 60.0
                    * HOURS_WEIGHT;

            let mut score = candidate.coverage_ratio - fairness_penalty - hours_penalty;
            if candidate.full_coverage {
                score += FULL_COVERAGE_BONUS;
            }
            if score < 0.0 {
                score = 0.0;
            }

            *fairness_index += candidate.coverage_ratio.max(FAIRNESS_FLOOR);

            variables.push(ModelVariable {
                name: self.variable_name(candidate, &mut window_counts),
                candidate_index: index,
                score,
            });
        }

        variables
    }

    /// Deterministic name from (employee, day, span), with a window
    /// suffix from the second coverage window of the same triple on.
    fn variable_name(
        &self,
        candidate: &CandidateAssignment,
        window_counts: &mut HashMap<(i64, NaiveDate, i64), usize>,
    ) -> String {
        let base = format!(
            "x_{}_{}_s{}",
            candidate.employee_id,
            candidate.day.format("%Y%m%d"),
            candidate.span_id
        );
        let count = window_counts
            .entry((candidate.employee_id, candidate.day, candidate.span_id))
            .or_insert(0);
        let name = if *count == 0 {
            base
        } else {
            format!("{}_w{}", base, count)
        };
        *count += 1;
        name
    }

    /// Span length in minutes for the hours penalty. Unknown or
    /// unparseable spans fall back to the candidate's own window, which
    /// equals span minutes times the coverage ratio.
    fn candidate_span_minutes(&self, candidate: &CandidateAssignment) -> f64 {
        if let Some(&minutes) = self.span_minutes.get(&candidate.span_id) {
            return minutes;
        }
        let start = parse_clock(&candidate.coverage_start).unwrap_or(0);
        let end = parse_clock(&candidate.coverage_end).unwrap_or(start);
        let window = (end - start).max(0) as f64;
        if candidate.coverage_ratio > 0.0 {
            window / candidate.coverage_ratio
        } else {
            window
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn spans() -> Vec<TimeSpan> {
        vec![TimeSpan::new(1, "Day", "09:00", "17:00")]
    }

    fn candidate(
        employee_id: i64,
        day: NaiveDate,
        span_id: i64,
        start: &str,
        end: &str,
        ratio: f64,
        full: bool,
    ) -> CandidateAssignment {
        CandidateAssignment {
            employee_id,
            day,
            span_id,
            coverage_start: start.to_string(),
            coverage_end: end.to_string(),
            coverage_ratio: ratio,
            full_coverage: full,
        }
    }

    #[test]
    fn test_one_variable_per_candidate_with_window_suffix() {
        let candidates = vec![
            candidate(7, monday(), 1, "09:00", "17:00", 1.0, true),
            candidate(7, monday(), 1, "10:00", "14:00", 0.5, false),
        ];
        let capacities = WeekCapacity::new();
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        assert_eq!(model.variables.len(), 2);
        assert_eq!(model.variables[0].name, "x_7_20240603_s1");
        assert_eq!(model.variables[1].name, "x_7_20240603_s1_w1");
        assert_eq!(model.variables[0].candidate_index, 0);
        assert_eq!(model.variables[1].candidate_index, 1);
    }

    #[test]
    fn test_employee_day_exclusivity_constraint() {
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let candidates = vec![
            candidate(7, monday(), 1, "09:00", "17:00", 1.0, true),
            candidate(7, monday(), 2, "09:00", "13:00", 0.5, false),
            candidate(7, tuesday, 1, "09:00", "17:00", 1.0, true),
        ];
        let capacities = WeekCapacity::new();
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        // No capacities configured: only the two exclusivity constraints
        assert_eq!(model.constraints.len(), 2);
        let monday_constraint = &model.constraints[0];
        assert_eq!(monday_constraint.terms, vec![(0, 1.0), (1, 1.0)]);
        assert_eq!(monday_constraint.upper, 1.0);
        assert_eq!(model.constraints[1].terms, vec![(2, 1.0)]);
    }

    #[test]
    fn test_span_capacity_is_ratio_weighted() {
        let candidates = vec![
            candidate(7, monday(), 1, "09:00", "17:00", 1.0, true),
            candidate(8, monday(), 1, "10:00", "14:00", 0.5, false),
        ];
        let capacities = WeekCapacity::new().with_span_cap("2024-06-03", 1, 2.0);
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        let span_constraint = model
            .constraints
            .iter()
            .find(|c| c.label.starts_with("span"))
            .unwrap();
        assert_eq!(span_constraint.terms, vec![(0, 1.0), (1, 0.5)]);
        assert_eq!(span_constraint.upper, 2.0);
    }

    #[test]
    fn test_day_capacity_counts_heads() {
        let candidates = vec![
            candidate(7, monday(), 1, "10:00", "14:00", 0.5, false),
            candidate(8, monday(), 1, "10:00", "14:00", 0.5, false),
        ];
        let capacities = WeekCapacity::new().with_day_cap("*", 1.0);
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        let day_constraint = model
            .constraints
            .iter()
            .find(|c| c.label.starts_with("day"))
            .unwrap();
        // Headcount, not ratio-weighted
        assert_eq!(day_constraint.terms, vec![(0, 1.0), (1, 1.0)]);
        assert_eq!(day_constraint.upper, 1.0);
    }

    #[test]
    fn test_full_coverage_bonus_and_hours_penalty() {
        let candidates = vec![candidate(7, monday(), 1, "09:00", "17:00", 1.0, true)];
        let capacities = WeekCapacity::new();
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        // ratio 1.0 + bonus 0.75 - hours 480 * 1.0 / 60 * 0.001 = 1.742
        let expected = 1.0 + FULL_COVERAGE_BONUS - 480.0 / 60.0 * HOURS_WEIGHT;
        assert!((model.variables[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_running_fairness_lowers_later_scores() {
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let candidates = vec![
            candidate(7, monday(), 1, "09:00", "17:00", 1.0, true),
            candidate(7, tuesday, 1, "09:00", "17:00", 1.0, true),
        ];
        let capacities = WeekCapacity::new();
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        let first = model.variables[0].score;
        let second = model.variables[1].score;
        // The second candidate pays for the first one's index entry
        assert!((first - second - 1.0 * FAIRNESS_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_fairness_floor_applies_to_small_ratios() {
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let candidates = vec![
            candidate(7, monday(), 1, "09:00", "09:30", 0.0625, false),
            candidate(7, tuesday, 1, "09:00", "17:00", 1.0, true),
        ];
        let capacities = WeekCapacity::new();
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        // A tiny first candidate still contributes the 0.25 floor
        let full_score = 1.0 + FULL_COVERAGE_BONUS - 480.0 / 60.0 * HOURS_WEIGHT;
        let expected = full_score - FAIRNESS_FLOOR * FAIRNESS_WEIGHT;
        assert!((model.variables[1].score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_span_duration_recovered_from_window() {
        // span 99 is not configured; 4h window at ratio 0.5 implies 8h span
        let candidates = vec![candidate(7, monday(), 99, "10:00", "14:00", 0.5, false)];
        let capacities = WeekCapacity::new();
        let model = AssignmentModelBuilder::new(&candidates, &capacities, &spans()).build();

        let expected = 0.5 - 480.0 * 0.5 / 60.0 * HOURS_WEIGHT;
        assert!((model.variables[0].score - expected).abs() < 1e-9);
    }
}
