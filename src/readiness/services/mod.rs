//! Application services for readiness evaluation.

mod evaluator;

pub use evaluator::ReadinessEvaluator;
