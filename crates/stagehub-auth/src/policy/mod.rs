//! Policy evaluation: role table plus scope containment.

pub mod evaluator;
pub mod rules;

pub use evaluator::{PolicyEvaluator, ScopedPolicy};
