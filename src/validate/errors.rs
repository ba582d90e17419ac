//! # Structural Validation Failures

use std::fmt;

use serde::Serialize;

/// A single structural violation, localized to the exact failing node.
///
/// `coordinate` is the dot-joined absolute path from the document root
/// (array indices and object keys are both segments), e.g.
/// `steps.0.answers.1-2`. A failure at the root carries an empty
/// coordinate. This shape is the outbound contract of the validator and
/// must stay stable for callers that map failures onto form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub coordinate: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(coordinate: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            coordinate: coordinate.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.coordinate)
    }
}

impl std::error::Error for ValidationFailure {}
