//! Question model for quire
//!
//! Typed descriptions of questionnaires (steps, sections, questions) and
//! the answer documents collected against them. Pure data; every constraint
//! violation is reported through `ModelError` and checked before any schema
//! is composed.

mod answers;
mod errors;
mod question;
mod questionnaire;

pub use answers::{
    AnswerDocument, AnswerKey, AnswerValue, GridRow, Primitive, QuestionRef, StepState,
};
pub use errors::{ModelError, ModelResult};
pub use question::{
    GridColumn, Question, QuestionKind, MAX_GRID_COLUMNS, MAX_GRID_ROWS, MAX_SELECT_OPTIONS,
};
pub use questionnaire::{QuestionnaireDocument, Section, Step};
