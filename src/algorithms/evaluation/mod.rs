//! Dynamic-programming policy evaluation.

pub mod convergence;
pub mod evaluator;

pub use convergence::{diff, ConvergenceMetric};
pub use evaluator::{EvaluationOutcome, PolicyEvaluator, SweepReport};
