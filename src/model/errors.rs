//! # Question Model Errors

use thiserror::Error;

/// Result type for model constraint checks
pub type ModelResult<T> = Result<T, ModelError>;

/// Constraint violations in the question model.
///
/// Every variant is a schema-definition-time defect: a tree carrying one of
/// these must never reach the composer's output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("question '{label}': select_options are only valid on select questions")]
    OptionsOnNonSelect { label: String },

    #[error("question '{label}': select_options must not be empty")]
    EmptyOptions { label: String },

    #[error("question '{label}': at most {max} select_options allowed, got {got}")]
    TooManyOptions { label: String, max: usize, got: usize },

    #[error("question '{label}': grid_columns are only valid on grid questions")]
    GridColumnsOnNonGrid { label: String },

    #[error("question '{label}': grid_max_rows is only valid on grid questions")]
    GridMaxRowsOnNonGrid { label: String },

    #[error("question '{label}': grid_columns must not be empty")]
    EmptyGridColumns { label: String },

    #[error("question '{label}': at most {max} grid_columns allowed, got {got}")]
    TooManyGridColumns { label: String, max: usize, got: usize },

    #[error("question '{label}': grid_max_rows must be between 1 and {max}, got {got}")]
    GridMaxRowsOutOfRange { label: String, max: u32, got: u32 },

    #[error("grid column '{label}': kind '{kind}' is not valid in a grid column")]
    InvalidColumnKind { label: String, kind: String },

    #[error("section '{title}': must contain at least one question")]
    EmptySection { title: String },

    #[error("step '{title}': must contain at least one section")]
    EmptyStep { title: String },

    #[error("questionnaire must contain at least one step")]
    EmptyQuestionnaire,

    #[error("invalid answer key '{got}': expected '<section>-<question>'")]
    InvalidAnswerKey { got: String },

    #[error("invalid question reference '{got}': expected '<step>.<section>-<question>'")]
    InvalidQuestionRef { got: String },
}
