//! # Questionnaire Registry
//!
//! Read-mostly lookup of questionnaire revisions by slug. Publishing holds
//! the writer side of the lock across read-latest-then-insert, so no two
//! concurrent readers ever observe two different "latest" rows for a slug.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::document::DocumentChecker;
use crate::model::QuestionnaireDocument;
use crate::observability::Logger;

use super::errors::{RegistryError, RegistryResult};
use super::questionnaire::Questionnaire;

/// Trait for questionnaire revision lookups
pub trait QuestionnaireRegistry: Send + Sync {
    /// The latest revision for a slug
    fn latest(&self, slug: &str) -> RegistryResult<Questionnaire>;

    /// A specific revision
    fn get(&self, slug: &str, version: u32) -> RegistryResult<Option<Questionnaire>>;

    /// Publish a new revision: `version = latest + 1` (or 1 for a new
    /// slug), never a mutation of an existing row. The document is checked
    /// against `schema` before anything is inserted.
    fn publish(
        &self,
        slug: &str,
        name: &str,
        description: &str,
        document: QuestionnaireDocument,
        created_by: &str,
        schema: &Value,
    ) -> RegistryResult<Questionnaire>;
}

/// In-memory questionnaire registry
#[derive(Debug, Default)]
pub struct InMemoryQuestionnaireRegistry {
    // Revisions per slug, in ascending version order
    rows: RwLock<HashMap<String, Vec<Questionnaire>>>,
}

impl InMemoryQuestionnaireRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuestionnaireRegistry for InMemoryQuestionnaireRegistry {
    fn latest(&self, slug: &str) -> RegistryResult<Questionnaire> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RegistryError::Internal("Lock poisoned".into()))?;

        rows.get(slug)
            .and_then(|revisions| revisions.last())
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                slug: slug.to_string(),
            })
    }

    fn get(&self, slug: &str, version: u32) -> RegistryResult<Option<Questionnaire>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RegistryError::Internal("Lock poisoned".into()))?;

        Ok(rows
            .get(slug)
            .and_then(|revisions| revisions.iter().find(|q| q.version == version))
            .cloned())
    }

    fn publish(
        &self,
        slug: &str,
        name: &str,
        description: &str,
        document: QuestionnaireDocument,
        created_by: &str,
        schema: &Value,
    ) -> RegistryResult<Questionnaire> {
        let checker = DocumentChecker::new(schema).map_err(RegistryError::Document)?;
        checker.check_create(&document)?;

        // Single-writer section: next-version computation and insert must
        // not interleave with another publish of the same slug.
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RegistryError::Internal("Lock poisoned".into()))?;

        let revisions = rows.entry(slug.to_string()).or_default();
        let version = revisions.last().map_or(1, |q| q.version + 1);
        let questionnaire = Questionnaire::new_revision(
            slug,
            version,
            name,
            description,
            document,
            created_by,
        );
        revisions.push(questionnaire.clone());

        Logger::info(
            "QUESTIONNAIRE_PUBLISH",
            &[("slug", slug), ("version", &version.to_string())],
        );
        Ok(questionnaire)
    }
}
