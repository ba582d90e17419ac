//! quire - a strict, deterministic questionnaire document engine
//!
//! Versioned multi-step questionnaires, structural validation of answer
//! documents with exact failure coordinates, workflow-gated mutability,
//! and content-sniffing upload validation.

pub mod attachment;
pub mod document;
pub mod filecheck;
pub mod model;
pub mod observability;
pub mod registry;
pub mod schema;
pub mod validate;
pub mod version;
pub mod workflow;
