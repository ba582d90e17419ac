//! # Version Guard Errors

use thiserror::Error;

/// Result type for version checks
pub type VersionResult<T> = Result<T, VersionError>;

/// Schema-version drift between a document and the version in force.
///
/// Version tags are opaque tokens compared by exact string equality;
/// they are never parsed or ordered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The document does not carry the version baked into the schema in
    /// force at creation time.
    #[error("schema version mismatch: expected {expected}, got {got}")]
    SchemaVersionMismatch { expected: String, got: String },

    /// An update tried to move an existing document to a different version.
    #[error("schema version mismatch: previously {previous}, got {got}")]
    PreviousVersionMismatch { previous: String, got: String },
}
