//! # Schema Composition Errors

use thiserror::Error;

use crate::model::ModelError;

/// Result type for schema composition
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Schema composition failures.
///
/// Every variant is a startup-time defect: composition runs over code-owned
/// question trees, so a failure here means the schema definition itself is
/// wrong. Callers must treat these as fatal, not as request errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("invalid question model: {0}")]
    InvalidModel(#[from] ModelError),

    #[error("schema self-check failed at {location}: {reason}")]
    Malformed { location: String, reason: String },
}

impl ComposeError {
    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }
}
