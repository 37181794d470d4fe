// Extractor module exports
pub mod solution_translator;

pub use solution_translator::{SolutionTranslator, CAPACITY_EPSILON};
