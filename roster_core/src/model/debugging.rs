use colored::*;
use std::env;

use crate::model::AssignmentModel;
use crate::solver::SolverOutcome;

const MAX_CONSTRAINTS_SHOWN: usize = 5;

pub fn debug_enabled() -> bool {
    env::var("RUST_DEBUG").is_ok() || env::args().any(|arg| arg == "--debug")
}

/// Prints the assembled model when debugging is enabled.
pub fn debug_model(model: &AssignmentModel) {
    if !debug_enabled() {
        return;
    }

    println!("{}", "🔍 Assignment Model:".yellow().bold());
    println!(
        "   {} variables, {} constraints",
        model.variables.len().to_string().cyan(),
        model.constraints.len().to_string().cyan()
    );

    for variable in &model.variables {
        println!(
            "   {} (candidate {}): score {}",
            variable.name.green(),
            variable.candidate_index,
            format!("{:.4}", variable.score).yellow()
        );
    }

    // Limit the constraint dump to avoid overwhelming output
    for constraint in model.constraints.iter().take(MAX_CONSTRAINTS_SHOWN) {
        let terms = constraint
            .terms
            .iter()
            .map(|(index, coeff)| format!("{:.2}*x{}", coeff, index))
            .collect::<Vec<_>>()
            .join(" + ");
        println!(
            "   {} => {} <= {}",
            constraint.label.blue(),
            terms,
            constraint.upper.to_string().yellow()
        );
    }
    if model.constraints.len() > MAX_CONSTRAINTS_SHOWN {
        println!(
            "   ... {} more constraints",
            model.constraints.len() - MAX_CONSTRAINTS_SHOWN
        );
    }
}

/// Prints the solver outcome when debugging is enabled.
pub fn debug_outcome(outcome: &SolverOutcome) {
    if !debug_enabled() {
        return;
    }

    if !outcome.feasible {
        println!("{}", "❌ Model is infeasible".red().bold());
        return;
    }

    println!("{}", "✅ Model solved".green().bold());
    let selected = outcome
        .values
        .iter()
        .filter(|(name, _)| outcome.is_selected(name))
        .count();
    println!("   {} of {} variables selected", selected, outcome.values.len());
}
