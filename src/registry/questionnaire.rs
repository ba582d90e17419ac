//! # Questionnaire Rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QuestionnaireDocument;

/// One published revision of a questionnaire.
///
/// Rows are immutable: an edit publishes a new row with `version + 1` and
/// fresh provenance. For a given slug, versions increase monotonically and
/// exactly one row is latest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: Uuid,
    pub slug: String,
    pub version: u32,
    pub name: String,
    pub description: String,
    pub document: QuestionnaireDocument,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Questionnaire {
    pub(crate) fn new_revision(
        slug: impl Into<String>,
        version: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        document: QuestionnaireDocument,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            version,
            name: name.into(),
            description: description.into(),
            document,
            created_at: Utc::now(),
            created_by: created_by.into(),
        }
    }
}
