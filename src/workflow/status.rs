//! Application lifecycle states
//!
//! States are explicit and enumerable. Transitions are edges of a fixed
//! table, never inferred from field comparisons, so the whole graph is
//! auditable and exhaustively testable.
//!
//! ```text
//! draft -> submitted -> under_review -> action_required -> processing -> approved
//!   |                                                          \-> rejected
//!   \-> discarded
//! ```
//!
//! `approved`, `rejected`, and `discarded` are absorbing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of the record owning an answer document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Draft,
    Submitted,
    UnderReview,
    ActionRequired,
    Processing,
    Approved,
    Rejected,
    Discarded,
}

/// The complete lifecycle graph. Any pair not listed here is forbidden.
const TRANSITIONS: &[(Status, Status)] = &[
    (Status::Draft, Status::Submitted),
    (Status::Draft, Status::Discarded),
    (Status::Submitted, Status::UnderReview),
    (Status::UnderReview, Status::ActionRequired),
    (Status::ActionRequired, Status::Processing),
    (Status::Processing, Status::Approved),
    (Status::Processing, Status::Rejected),
];

impl Status {
    /// Returns the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Submitted => "submitted",
            Status::UnderReview => "under_review",
            Status::ActionRequired => "action_required",
            Status::Processing => "processing",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Discarded => "discarded",
        }
    }

    /// All states, in lifecycle order
    pub fn all() -> &'static [Status] {
        &[
            Status::Draft,
            Status::Submitted,
            Status::UnderReview,
            Status::ActionRequired,
            Status::Processing,
            Status::Approved,
            Status::Rejected,
            Status::Discarded,
        ]
    }

    /// Whether the lifecycle graph has an edge from `self` to `to`
    pub fn can_transition_to(&self, to: Status) -> bool {
        TRANSITIONS.contains(&(*self, to))
    }

    /// States with no outgoing edges
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Approved | Status::Rejected | Status::Discarded)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
