// Model module exports
pub mod builder;
pub mod debugging;

pub use builder::{
    AssignmentModel, AssignmentModelBuilder, LinearConstraint, ModelVariable,
    FAIRNESS_FLOOR, FAIRNESS_WEIGHT, FULL_COVERAGE_BONUS, HOURS_WEIGHT,
};
