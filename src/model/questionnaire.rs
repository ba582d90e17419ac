//! Questionnaire tree: steps, sections, and the versioned document

use serde::{Deserialize, Serialize};

use super::errors::{ModelError, ModelResult};
use super::question::Question;

/// An ordered group of questions inside a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            description: None,
            questions,
        }
    }

    pub fn check_constraints(&self) -> ModelResult<()> {
        if self.questions.is_empty() {
            return Err(ModelError::EmptySection {
                title: self.title.clone(),
            });
        }
        for question in &self.questions {
            question.check_constraints()?;
        }
        Ok(())
    }
}

/// An ordered group of sections, one page of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<Section>,
}

impl Step {
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            description: None,
            sections,
        }
    }

    pub fn check_constraints(&self) -> ModelResult<()> {
        if self.sections.is_empty() {
            return Err(ModelError::EmptyStep {
                title: self.title.clone(),
            });
        }
        for section in &self.sections {
            section.check_constraints()?;
        }
        Ok(())
    }
}

/// The complete questionnaire document embedded in a questionnaire row.
///
/// `schema_version` is immutable once set; a new edit of the questionnaire
/// creates a new row, never a mutation of this document in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireDocument {
    pub schema_version: String,
    pub steps: Vec<Step>,
}

impl QuestionnaireDocument {
    pub fn new(schema_version: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            schema_version: schema_version.into(),
            steps,
        }
    }

    pub fn check_constraints(&self) -> ModelResult<()> {
        if self.steps.is_empty() {
            return Err(ModelError::EmptyQuestionnaire);
        }
        for step in &self.steps {
            step.check_constraints()?;
        }
        Ok(())
    }
}
