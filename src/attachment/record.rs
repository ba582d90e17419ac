//! # Attachment Records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::model::QuestionRef;

/// An uploaded file attached to one question of an answer document.
///
/// Attachments are never hard-deleted: `soft_delete` is the only
/// destructive operation, and a soft-deleted attachment drops out of all
/// normal listings and downloads while its row (and bytes) remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Opaque identifier used in download URLs
    pub key: Uuid,
    /// The owning application record
    pub application_key: Uuid,
    /// Which question this file answers, as `"<step>.<section>-<question>"`
    pub question: QuestionRef,
    /// Declared file name, as uploaded
    pub name: String,
    pub size: u64,
    /// SHA-256 of the stored bytes, hex-encoded
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Attachment {
    /// Create a record for a validated upload
    pub fn new(
        application_key: Uuid,
        question: QuestionRef,
        name: impl Into<String>,
        data: &[u8],
    ) -> Self {
        Self {
            key: Uuid::new_v4(),
            application_key,
            question,
            name: name.into(),
            size: data.len() as u64,
            checksum: Self::calculate_checksum(data),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Calculate checksum for data
    pub fn calculate_checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks the attachment deleted. Idempotent: a second call leaves
    /// `deleted_at` at its first-set value.
    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }
}
