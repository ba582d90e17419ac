//! # Attachment Store Errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for attachment operations
pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Attachment store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("attachment not found: {0}")]
    NotFound(Uuid),

    #[error("attachment already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AttachmentError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            AttachmentError::NotFound(_) => 404,
            AttachmentError::AlreadyExists(_) => 409,
            AttachmentError::Internal(_) => 500,
        }
    }
}
