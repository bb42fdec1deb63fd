//! Raid readiness evaluation for game characters.
//!
//! Given a character's equipment snapshot and the externally maintained
//! requirement (minimum item level plus accepted enchants), the
//! [`services::ReadinessEvaluator`] produces an inspectable per-slot
//! breakdown instead of a single verdict.
//!
//! - Domain types in [`domain`]
//! - Evaluation in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
