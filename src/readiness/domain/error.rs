//! Error types for readiness requirements.

use thiserror::Error;

/// Errors raised while reading readiness requirements from tabular data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadinessError {
    /// The requirement table lacks the minimum item level cell.
    #[error("requirement table has no minimum item level cell")]
    MissingMinimumLevel,

    /// The minimum item level cell is not a whole number.
    #[error("minimum item level '{0}' is not a whole number")]
    InvalidMinimumLevel(String),
}
