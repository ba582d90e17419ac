//! Schema composition subsystem for quire
//!
//! Composes document schemas from the question model. Schemas are plain
//! `serde_json::Value` data with `$defs`/`$ref` indirection.
//!
//! # Design Principles
//!
//! - Composition is pure; every call returns a fresh, caller-owned value
//! - Definitions are referenced by name, never duplicated
//! - The `schema_version` marker is pinned and read-only
//! - Invalid constraint combinations fail at composition time, not at
//!   validation time
//! - Every composed schema passes its own self-check before being returned

mod compose;
mod errors;

pub use compose::{check, compose, compose_answers, version_tag, ANSWER_KEY_PATTERN};
pub use errors::{ComposeError, ComposeResult};
