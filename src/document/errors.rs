//! # Document Check Errors

use thiserror::Error;

use crate::validate::ValidationFailure;
use crate::version::VersionError;

/// Result type for document checks
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failures raised by the shared document checker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("invalid document: {}", .failures.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; "))]
    Invalid { failures: Vec<ValidationFailure> },

    /// An update whose document is identical to the stored one
    #[error("no change detected in the document field")]
    NoChange,

    /// The schema handed to the checker carries no version tag; a
    /// composition defect, not a caller error.
    #[error("schema has no version tag")]
    MissingVersionTag,

    #[error("serialization error: {0}")]
    Serialize(String),
}
