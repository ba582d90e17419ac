//! Mutation gate
//!
//! Decides whether a given field of an application record may be written
//! under the current workflow status. The calling boundary hands the gate
//! exactly one target field per request: a single update targets either
//! the answer document or the status, never both.

use std::str::FromStr;

use super::errors::{WorkflowError, WorkflowResult};
use super::status::Status;

/// The writable fields of an application record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The answer document
    Document,
    /// The workflow status
    Status,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Document => "document",
            Field::Status => "status",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(Field::Document),
            "status" => Ok(Field::Status),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Workflow-state-aware write policy
pub struct MutationGate;

impl MutationGate {
    /// Whether `field` may be written at all while the record is in
    /// `status`. Answer-document content is mutable only in draft; the
    /// status field is only ever writable from draft.
    pub fn can_mutate(field: Field, status: Status) -> bool {
        match field {
            Field::Document => status == Status::Draft,
            Field::Status => status == Status::Draft,
        }
    }

    /// Checks a status change requested through an ordinary update.
    ///
    /// The only edge an applicant-facing update may take is
    /// draft -> submitted. Every other request fails, including edges
    /// that exist in the lifecycle graph but belong to the review side.
    pub fn check_transition(from: Status, to: Status) -> WorkflowResult<()> {
        if from == Status::Draft && to == Status::Submitted {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition { from, to })
        }
    }

    /// Checks the dedicated discard operation: draft records only.
    pub fn check_discard(from: Status) -> WorkflowResult<()> {
        if from.can_transition_to(Status::Discarded) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                from,
                to: Status::Discarded,
            })
        }
    }
}
