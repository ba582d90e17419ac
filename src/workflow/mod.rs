//! Workflow subsystem for quire
//!
//! The application lifecycle as an explicit state machine, and the
//! mutation gate that decides which fields may change under each status.
//!
//! # Design Principles
//!
//! - States are explicit and enumerable
//! - The transition graph is a fixed table, audited in one place
//! - Content mutation and status transition are mutually exclusive per
//!   request; the gate receives exactly one target field
//! - All rejections are explicit

mod errors;
mod gate;
mod status;

pub use errors::{WorkflowError, WorkflowResult};
pub use gate::{Field, MutationGate};
pub use status::Status;
