//! # Workflow Errors

use thiserror::Error;

use super::status::Status;

/// Result type for workflow checks
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Illegal operations against the application lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The requested status change is not an edge of the lifecycle graph,
    /// or is not one the requesting boundary may take.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: Status, to: Status },
}
