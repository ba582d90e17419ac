//! # Attachment Metadata Storage
//!
//! Abstraction for attachment metadata persistence. The in-memory store
//! backs tests and small deployments; a database-backed implementation
//! plugs in at the same trait.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::observability::Logger;

use super::errors::{AttachmentError, AttachmentResult};
use super::record::Attachment;

/// Trait for attachment metadata operations.
///
/// Soft-deleted rows are invisible through `get` and `list`; only
/// `soft_delete` itself may touch them (to stay idempotent).
pub trait AttachmentStore: Send + Sync {
    /// Insert a new attachment record
    fn insert(&self, attachment: Attachment) -> AttachmentResult<()>;

    /// Get a live attachment by key (for download)
    fn get(&self, key: &Uuid) -> AttachmentResult<Option<Attachment>>;

    /// List live attachments of an application
    fn list(&self, application_key: &Uuid) -> AttachmentResult<Vec<Attachment>>;

    /// Mark an attachment deleted. Idempotent: repeating the call leaves
    /// `deleted_at` at its first-set value.
    fn soft_delete(&self, key: &Uuid) -> AttachmentResult<()>;
}

/// In-memory attachment store
#[derive(Debug, Default)]
pub struct InMemoryAttachmentStore {
    rows: RwLock<HashMap<Uuid, Attachment>>,
}

impl InMemoryAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttachmentStore for InMemoryAttachmentStore {
    fn insert(&self, attachment: Attachment) -> AttachmentResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| AttachmentError::Internal("Lock poisoned".into()))?;

        if rows.contains_key(&attachment.key) {
            return Err(AttachmentError::AlreadyExists(attachment.key));
        }
        rows.insert(attachment.key, attachment);
        Ok(())
    }

    fn get(&self, key: &Uuid) -> AttachmentResult<Option<Attachment>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| AttachmentError::Internal("Lock poisoned".into()))?;

        Ok(rows.get(key).filter(|a| !a.is_deleted()).cloned())
    }

    fn list(&self, application_key: &Uuid) -> AttachmentResult<Vec<Attachment>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| AttachmentError::Internal("Lock poisoned".into()))?;

        let mut attachments: Vec<Attachment> = rows
            .values()
            .filter(|a| a.application_key == *application_key && !a.is_deleted())
            .cloned()
            .collect();
        attachments.sort_by_key(|a| a.created_at);
        Ok(attachments)
    }

    fn soft_delete(&self, key: &Uuid) -> AttachmentResult<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| AttachmentError::Internal("Lock poisoned".into()))?;

        let attachment = rows.get_mut(key).ok_or(AttachmentError::NotFound(*key))?;
        if !attachment.is_deleted() {
            attachment.soft_delete();
            Logger::info(
                "ATTACHMENT_SOFT_DELETE",
                &[("key", &key.to_string()), ("name", &attachment.name)],
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionRef;

    fn stored(store: &InMemoryAttachmentStore, application_key: Uuid) -> Attachment {
        let attachment = Attachment::new(
            application_key,
            QuestionRef::new(0, 0, 0),
            "file.pdf",
            b"%PDF data",
        );
        store.insert(attachment.clone()).unwrap();
        attachment
    }

    #[test]
    fn test_insert_and_get() {
        let store = InMemoryAttachmentStore::new();
        let attachment = stored(&store, Uuid::new_v4());

        let fetched = store.get(&attachment.key).unwrap().unwrap();
        assert_eq!(fetched.key, attachment.key);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = InMemoryAttachmentStore::new();
        let attachment = stored(&store, Uuid::new_v4());

        let result = store.insert(attachment.clone());
        assert_eq!(result, Err(AttachmentError::AlreadyExists(attachment.key)));
    }

    #[test]
    fn test_soft_deleted_hidden_from_get_and_list() {
        let store = InMemoryAttachmentStore::new();
        let app = Uuid::new_v4();
        let attachment = stored(&store, app);

        assert_eq!(store.list(&app).unwrap().len(), 1);

        store.soft_delete(&attachment.key).unwrap();
        assert_eq!(store.get(&attachment.key).unwrap(), None);
        assert!(store.list(&app).unwrap().is_empty());
    }

    #[test]
    fn test_soft_delete_is_idempotent_in_store() {
        let store = InMemoryAttachmentStore::new();
        let attachment = stored(&store, Uuid::new_v4());

        store.soft_delete(&attachment.key).unwrap();
        let first = {
            let rows = store.rows.read().unwrap();
            rows[&attachment.key].deleted_at
        };

        store.soft_delete(&attachment.key).unwrap();
        let second = {
            let rows = store.rows.read().unwrap();
            rows[&attachment.key].deleted_at
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_soft_delete_unknown_key() {
        let store = InMemoryAttachmentStore::new();
        let key = Uuid::new_v4();
        assert_eq!(store.soft_delete(&key), Err(AttachmentError::NotFound(key)));
    }

    #[test]
    fn test_list_scoped_to_application() {
        let store = InMemoryAttachmentStore::new();
        let app_a = Uuid::new_v4();
        let app_b = Uuid::new_v4();
        stored(&store, app_a);
        stored(&store, app_b);

        assert_eq!(store.list(&app_a).unwrap().len(), 1);
        assert_eq!(store.list(&app_b).unwrap().len(), 1);
    }
}
