//! Shared document checker
//!
//! Questionnaire documents and answer documents go through the same gate:
//! version guard first, then structural validation, with coordinate-tagged
//! failures surfaced unchanged. Each record kind implements
//! [`ValidatableDocument`]; the checking logic lives here once.

use serde::Serialize;
use serde_json::Value;

use crate::model::{AnswerDocument, QuestionnaireDocument};
use crate::schema::version_tag;
use crate::validate::validate;
use crate::version::check_version;

use super::errors::{DocumentError, DocumentResult};

/// A record kind whose embedded JSON document is version-pinned and
/// structurally validatable
pub trait ValidatableDocument: Serialize {
    /// The schema version this document claims to conform to
    fn schema_version(&self) -> &str;
}

impl ValidatableDocument for QuestionnaireDocument {
    fn schema_version(&self) -> &str {
        &self.schema_version
    }
}

impl ValidatableDocument for AnswerDocument {
    fn schema_version(&self) -> &str {
        &self.schema_version
    }
}

/// Runs the version guard and the structural validator against one schema
pub struct DocumentChecker<'a> {
    schema: &'a Value,
    expected_version: &'a str,
}

impl<'a> DocumentChecker<'a> {
    /// Builds a checker over a composed schema. The schema must carry a
    /// version tag; a missing tag is a composition defect.
    pub fn new(schema: &'a Value) -> DocumentResult<Self> {
        let expected_version = version_tag(schema).ok_or(DocumentError::MissingVersionTag)?;
        Ok(Self {
            schema,
            expected_version,
        })
    }

    /// The version tag documents checked here must carry on creation
    pub fn expected_version(&self) -> &str {
        self.expected_version
    }

    /// Checks a newly created document: it must carry the version in
    /// force and satisfy the schema.
    pub fn check_create<D: ValidatableDocument>(&self, document: &D) -> DocumentResult<()> {
        check_version(document.schema_version(), self.expected_version, None)?;
        self.check_structure(document)
    }

    /// Checks an updated document against its stored predecessor: the
    /// version is pinned to the previous revision, the structure must
    /// satisfy the schema, and a byte-identical edit is rejected.
    pub fn check_update<D: ValidatableDocument>(
        &self,
        document: &D,
        previous: &D,
    ) -> DocumentResult<()> {
        check_version(
            document.schema_version(),
            self.expected_version,
            Some(previous.schema_version()),
        )?;
        self.check_structure(document)?;

        if to_value(document)? == to_value(previous)? {
            return Err(DocumentError::NoChange);
        }
        Ok(())
    }

    fn check_structure<D: ValidatableDocument>(&self, document: &D) -> DocumentResult<()> {
        let value = to_value(document)?;
        validate(&value, self.schema).map_err(|failures| DocumentError::Invalid { failures })
    }
}

fn to_value<D: Serialize>(document: &D) -> DocumentResult<Value> {
    serde_json::to_value(document).map_err(|e| DocumentError::Serialize(e.to_string()))
}
