use std::collections::HashMap;

use good_lp::{constraint, default_solver, variable, variables, Expression, ResolutionError,
    Solution, SolverModel};

use crate::model::{AssignmentModel, LinearConstraint, ModelVariable};

/// Solver values at or above this threshold count as "selected".
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// What a solver run produced: a feasibility flag and, when feasible,
/// one numeric value per variable name.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub feasible: bool,
    pub values: HashMap<String, f64>,
}

impl SolverOutcome {
    pub fn infeasible() -> Self {
        SolverOutcome {
            feasible: false,
            values: HashMap::new(),
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(0.0) >= SELECTION_THRESHOLD
    }
}

/// The pluggable solving seam: one-shot, synchronous, no side effects
/// beyond the returned values. Infeasibility is a normal outcome, not an
/// `Err`; `Err` is reserved for backend failures.
pub trait MilpSolver {
    fn solve(&self, model: &AssignmentModel) -> Result<SolverOutcome, String>;
}

/// Bundled branch-and-bound backend (good_lp's microlp solver).
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        MicroLpSolver
    }
}

impl MilpSolver for MicroLpSolver {
    fn solve(&self, model: &AssignmentModel) -> Result<SolverOutcome, String> {
        if model.is_empty() {
            return Ok(SolverOutcome {
                feasible: true,
                values: HashMap::new(),
            });
        }

        // 1) One binary good_lp variable per model variable
        let mut builder = variables!();
        let mut vars = Vec::with_capacity(model.variables.len());
        for _ in &model.variables {
            vars.push(builder.add(variable().binary()));
        }

        // 2) Objective from the per-variable scores
        let mut objective = Expression::from(0);
        for (index, model_variable) in model.variables.iter().enumerate() {
            objective += model_variable.score * vars[index];
        }

        let mut problem = builder.maximise(objective).using(default_solver);

        // 3) Constraints
        for model_constraint in &model.constraints {
            let mut lhs = Expression::from(0);
            for &(index, coeff) in &model_constraint.terms {
                lhs += coeff * vars[index];
            }
            problem = problem.with(constraint!(lhs <= model_constraint.upper));
        }

        // 4) Solve once; infeasibility is a normal outcome
        match problem.solve() {
            Ok(solution) => {
                let mut values = HashMap::new();
                for (index, model_variable) in model.variables.iter().enumerate() {
                    values.insert(model_variable.name.clone(), solution.value(vars[index]));
                }
                Ok(SolverOutcome {
                    feasible: true,
                    values,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(SolverOutcome::infeasible()),
            Err(e) => Err(format!("solver failure: {}", e)),
        }
    }
}

/// Solves a one-variable smoke model. Services call this at startup so a
/// broken solver backend fails the process instead of degrading requests.
pub fn probe(solver: &dyn MilpSolver) -> Result<(), String> {
    let model = AssignmentModel {
        variables: vec![ModelVariable {
            name: "probe".to_string(),
            candidate_index: 0,
            score: 1.0,
        }],
        constraints: vec![LinearConstraint {
            label: "probe".to_string(),
            terms: vec![(0, 1.0)],
            upper: 1.0,
        }],
    };

    let outcome = solver.solve(&model)?;
    if !outcome.feasible {
        return Err("solver probe reported an infeasible trivial model".to_string());
    }
    if !outcome.is_selected("probe") {
        return Err("solver probe did not select the trivial variable".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable_named(name: &str, index: usize, score: f64) -> ModelVariable {
        ModelVariable {
            name: name.to_string(),
            candidate_index: index,
            score,
        }
    }

    #[test]
    fn test_empty_model_is_trivially_feasible() {
        let outcome = MicroLpSolver::new().solve(&AssignmentModel::default()).unwrap();
        assert!(outcome.feasible);
        assert!(outcome.values.is_empty());
    }

    #[test]
    fn test_picks_higher_scoring_variable_under_cap() {
        let model = AssignmentModel {
            variables: vec![
                variable_named("a", 0, 1.0),
                variable_named("b", 1, 2.0),
            ],
            constraints: vec![LinearConstraint {
                label: "cap".to_string(),
                terms: vec![(0, 1.0), (1, 1.0)],
                upper: 1.0,
            }],
        };

        let outcome = MicroLpSolver::new().solve(&model).unwrap();
        assert!(outcome.feasible);
        assert!(!outcome.is_selected("a"));
        assert!(outcome.is_selected("b"));
    }

    #[test]
    fn test_infeasible_maps_to_outcome() {
        // sum(x) <= -1 cannot hold for binary x
        let model = AssignmentModel {
            variables: vec![variable_named("a", 0, 1.0)],
            constraints: vec![LinearConstraint {
                label: "impossible".to_string(),
                terms: vec![(0, 1.0)],
                upper: -1.0,
            }],
        };

        let outcome = MicroLpSolver::new().solve(&model).unwrap();
        assert!(!outcome.feasible);
        assert!(outcome.values.is_empty());
    }

    #[test]
    fn test_probe_succeeds_on_bundled_solver() {
        assert!(probe(&MicroLpSolver::new()).is_ok());
    }

    #[test]
    fn test_selection_threshold() {
        let mut outcome = SolverOutcome::infeasible();
        outcome.feasible = true;
        outcome.values.insert("x".to_string(), 0.49);
        outcome.values.insert("y".to_string(), 0.5);
        assert!(!outcome.is_selected("x"));
        assert!(outcome.is_selected("y"));
        assert!(!outcome.is_selected("missing"));
    }
}
