//! Question model type definitions
//!
//! A question is the leaf entity of a questionnaire tree. Supported kinds:
//! - text: single-line free text
//! - textarea: multi-line free text
//! - number: non-negative numeric input
//! - checkbox: boolean flag
//! - select: one choice from an ordered option list
//! - date: ISO date string
//! - file: attachment upload slot
//! - grid: a bounded matrix of sub-fields (columns x rows)
//!
//! Constraint invariants:
//! - `select_options` present only when kind == select, non-empty
//! - `grid_columns` / `grid_max_rows` present only when kind == grid
//! - grid columns are primitive kinds plus select, never file or grid

use serde::{Deserialize, Serialize};

use super::errors::{ModelError, ModelResult};

/// Maximum number of entries in a select option list
pub const MAX_SELECT_OPTIONS: usize = 50;
/// Maximum number of columns in a grid question
pub const MAX_GRID_COLUMNS: usize = 10;
/// Maximum number of rows a grid answer may carry
pub const MAX_GRID_ROWS: u32 = 20;

/// Supported question kinds, serialized under the wire key `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Textarea,
    Number,
    Checkbox,
    Select,
    Date,
    File,
    Grid,
}

impl QuestionKind {
    /// Returns the wire name for error messages and schema enums
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Textarea => "textarea",
            QuestionKind::Number => "number",
            QuestionKind::Checkbox => "checkbox",
            QuestionKind::Select => "select",
            QuestionKind::Date => "date",
            QuestionKind::File => "file",
            QuestionKind::Grid => "grid",
        }
    }

    /// Kinds that are legal inside a grid column (everything but file and grid)
    pub fn is_column_kind(&self) -> bool {
        !matches!(self, QuestionKind::File | QuestionKind::Grid)
    }

    /// All kinds legal on a top-level question, in wire order
    pub fn all() -> &'static [QuestionKind] {
        &[
            QuestionKind::Text,
            QuestionKind::Textarea,
            QuestionKind::Number,
            QuestionKind::Checkbox,
            QuestionKind::Select,
            QuestionKind::Date,
            QuestionKind::File,
            QuestionKind::Grid,
        ]
    }

    /// Kinds legal inside a grid column, in wire order
    pub fn column_kinds() -> &'static [QuestionKind] {
        &[
            QuestionKind::Text,
            QuestionKind::Textarea,
            QuestionKind::Number,
            QuestionKind::Checkbox,
            QuestionKind::Select,
            QuestionKind::Date,
        ]
    }
}

/// A single column of a grid question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridColumn {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_options: Option<Vec<String>>,
}

impl GridColumn {
    pub fn new(label: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            description: None,
            select_options: None,
        }
    }

    /// Checks the column's own constraint invariants
    pub fn check_constraints(&self) -> ModelResult<()> {
        if !self.kind.is_column_kind() {
            return Err(ModelError::InvalidColumnKind {
                label: self.label.clone(),
                kind: self.kind.as_str().into(),
            });
        }

        if let Some(options) = &self.select_options {
            if self.kind != QuestionKind::Select {
                return Err(ModelError::OptionsOnNonSelect {
                    label: self.label.clone(),
                });
            }
            if options.is_empty() {
                return Err(ModelError::EmptyOptions {
                    label: self.label.clone(),
                });
            }
            if options.len() > MAX_SELECT_OPTIONS {
                return Err(ModelError::TooManyOptions {
                    label: self.label.clone(),
                    max: MAX_SELECT_OPTIONS,
                    got: options.len(),
                });
            }
        }

        Ok(())
    }
}

/// A single question with its constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "is_required", default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<Vec<GridColumn>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_max_rows: Option<u32>,
}

impl Question {
    pub fn new(label: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            required: false,
            description: None,
            select_options: None,
            grid_columns: None,
            grid_max_rows: None,
        }
    }

    /// Create a free-text question
    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label, QuestionKind::Text)
    }

    /// Create a numeric question
    pub fn number(label: impl Into<String>) -> Self {
        Self::new(label, QuestionKind::Number)
    }

    /// Create a select question with its option list
    pub fn select(label: impl Into<String>, options: Vec<String>) -> Self {
        let mut q = Self::new(label, QuestionKind::Select);
        q.select_options = Some(options);
        q
    }

    /// Create a grid question with its column definitions
    pub fn grid(label: impl Into<String>, columns: Vec<GridColumn>) -> Self {
        let mut q = Self::new(label, QuestionKind::Grid);
        q.grid_columns = Some(columns);
        q
    }

    /// Mark the question as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the question's constraint invariants.
    ///
    /// A violation here is a schema-definition defect and must abort
    /// composition, never surface as a runtime validation failure.
    pub fn check_constraints(&self) -> ModelResult<()> {
        if let Some(options) = &self.select_options {
            if self.kind != QuestionKind::Select {
                return Err(ModelError::OptionsOnNonSelect {
                    label: self.label.clone(),
                });
            }
            if options.is_empty() {
                return Err(ModelError::EmptyOptions {
                    label: self.label.clone(),
                });
            }
            if options.len() > MAX_SELECT_OPTIONS {
                return Err(ModelError::TooManyOptions {
                    label: self.label.clone(),
                    max: MAX_SELECT_OPTIONS,
                    got: options.len(),
                });
            }
        }

        if let Some(columns) = &self.grid_columns {
            if self.kind != QuestionKind::Grid {
                return Err(ModelError::GridColumnsOnNonGrid {
                    label: self.label.clone(),
                });
            }
            if columns.is_empty() {
                return Err(ModelError::EmptyGridColumns {
                    label: self.label.clone(),
                });
            }
            if columns.len() > MAX_GRID_COLUMNS {
                return Err(ModelError::TooManyGridColumns {
                    label: self.label.clone(),
                    max: MAX_GRID_COLUMNS,
                    got: columns.len(),
                });
            }
            for column in columns {
                column.check_constraints()?;
            }
        }

        if let Some(rows) = self.grid_max_rows {
            if self.kind != QuestionKind::Grid {
                return Err(ModelError::GridMaxRowsOnNonGrid {
                    label: self.label.clone(),
                });
            }
            if rows == 0 || rows > MAX_GRID_ROWS {
                return Err(ModelError::GridMaxRowsOutOfRange {
                    label: self.label.clone(),
                    max: MAX_GRID_ROWS,
                    got: rows,
                });
            }
        }

        Ok(())
    }
}
