//! Shared document checking for quire
//!
//! One capability, two record kinds: questionnaire documents and answer
//! documents both run the version guard and the structural validator
//! through the same checker.

mod checker;
mod errors;

pub use checker::{DocumentChecker, ValidatableDocument};
pub use errors::{DocumentError, DocumentResult};
