//! Error types for planning runs.
//!
//! Infeasible or malformed allocations are never errors; they end up in
//! [`TermPlan::unresolved`](crate::models::TermPlan). Only an unusable
//! planner configuration or a mis-addressed request fails a call.

use thiserror::Error;

/// Errors raised by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The planner configuration cannot be used.
    #[error("Invalid planner configuration: {0}")]
    InvalidConfig(String),

    /// An allocation belongs to a different term than the one requested.
    #[error("Allocation '{allocation_id}' belongs to term '{found}', not '{expected}'")]
    TermMismatch {
        allocation_id: String,
        expected: String,
        found: String,
    },
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;
