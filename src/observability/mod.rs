//! Observability subsystem for quire
//!
//! Structured JSON logging for the engine's few stateful operations
//! (registry publishes, attachment soft-deletes, upload rejections).
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation outcomes
//! 3. No async or background threads
//! 4. Deterministic output

mod logger;

pub use logger::{Logger, Severity};
