//! # File Validation Errors

use thiserror::Error;

/// Result type for upload validation
pub type FileResult<T> = Result<T, FileError>;

/// Upload rejection reasons
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("file too large: {actual} bytes (max: {limit})")]
    FileTooLarge { limit: u64, actual: u64 },

    /// The claimed extension, the sniffed content type, and the allow-list
    /// did not agree. Deliberately carries no detail: the caller learns
    /// nothing about which check failed.
    #[error("unsupported file type")]
    UnsupportedFileType,

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FileError {
    fn from(e: std::io::Error) -> Self {
        FileError::Io(e.to_string())
    }
}
