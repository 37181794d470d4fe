pub mod candidates;
pub mod coverage;
pub mod extractor;
pub mod model;
pub mod solver;
pub mod types;

use chrono::NaiveDate;

use crate::candidates::{generate_candidates, week_days};
use crate::extractor::SolutionTranslator;
use crate::model::{debugging, AssignmentModel, AssignmentModelBuilder};
use crate::solver::{MicroLpSolver, MilpSolver, SolverOutcome};
use crate::types::{CandidateAssignment, ScheduleSolution, TimeSpan, WeekAvailability, WeekCapacity};

/// One week's scheduling engine: the configured spans plus an injected
/// solver handle. Every solve call is isolated; the engine keeps no
/// state between calls and can be shared across threads.
pub struct ScheduleEngine<S = MicroLpSolver> {
    spans: Vec<TimeSpan>,
    solver: S,
}

impl ScheduleEngine<MicroLpSolver> {
    /// Engine with the bundled microlp backend.
    pub fn with_default_solver(spans: Vec<TimeSpan>) -> Self {
        ScheduleEngine::new(spans, MicroLpSolver::new())
    }
}

impl<S: MilpSolver> ScheduleEngine<S> {
    pub fn new(spans: Vec<TimeSpan>, solver: S) -> Self {
        ScheduleEngine { spans, solver }
    }

    pub fn spans(&self) -> &[TimeSpan] {
        &self.spans
    }

    /// Solves a prepared candidate set against a capacity table.
    ///
    /// This is the engine's inbound operation: candidates are taken as
    /// given (normally from [`generate_candidates`]) and the unfilled
    /// report covers every candidate day plus every concrete date named
    /// in the capacity table.
    pub fn solve(
        &self,
        candidates: &[CandidateAssignment],
        capacities: &WeekCapacity,
    ) -> Result<ScheduleSolution, String> {
        let mut days: Vec<NaiveDate> = candidates.iter().map(|c| c.day).collect();
        days.extend(capacities.configured_days());
        days.sort();
        days.dedup();
        self.solve_for_days(candidates, capacities, &days)
    }

    /// Runs the full weekly pipeline: expands availability into
    /// candidates against the engine's spans, then solves. The unfilled
    /// report covers all 7 days of the week.
    pub fn solve_week(
        &self,
        availabilities: &[WeekAvailability],
        week_start: NaiveDate,
        capacities: &WeekCapacity,
    ) -> Result<ScheduleSolution, String> {
        let week = week_days(week_start);
        let candidates = generate_candidates(availabilities, &week, &self.spans);

        let mut days = week;
        days.extend(capacities.configured_days());
        days.sort();
        days.dedup();
        self.solve_for_days(&candidates, capacities, &days)
    }

    fn solve_for_days(
        &self,
        candidates: &[CandidateAssignment],
        capacities: &WeekCapacity,
        days: &[NaiveDate],
    ) -> Result<ScheduleSolution, String> {
        let translator = SolutionTranslator::new(candidates, capacities, &self.spans, days);

        // Zero candidates: a valid degenerate input; skip the solver and
        // report against full remaining capacity.
        if candidates.is_empty() {
            return Ok(translator.translate(&SolverOutcome::infeasible(), &AssignmentModel::default()));
        }

        let model = AssignmentModelBuilder::new(candidates, capacities, &self.spans).build();
        debugging::debug_model(&model);

        let outcome = self.solver.solve(&model)?;
        debugging::debug_outcome(&outcome);

        Ok(translator.translate(&outcome, &model))
    }
}
