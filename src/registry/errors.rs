//! # Questionnaire Registry Errors

use thiserror::Error;

use crate::document::DocumentError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Questionnaire registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The document being published failed its checks
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("questionnaire with slug '{slug}' does not exist")]
    NotFound { slug: String },

    #[error("internal error: {0}")]
    Internal(String),
}
