// ── Operation lifecycle ──
//
// Every operation goes IDLE -> Requested -> Fulfilled | Rejected. The three
// phases are variants of `Action`, and reconciliation matches on them
// exhaustively.

use std::fmt;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use crate::model::{Item, ItemId};

/// Per-store sequence number identifying one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OperationId(pub(crate) u64);

impl OperationId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// The four remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Enumerate,
    Create,
    Update,
    Remove,
}

impl Verb {
    /// Default `last_error` text when the service gives no better message.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Enumerate => "Failed to fetch items",
            Self::Create => "Failed to add item",
            Self::Update => "Failed to update item",
            Self::Remove => "Failed to delete item",
        }
    }
}

/// The authoritative result of a fulfilled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Enumerated(Vec<Item>),
    Created(Item),
    Updated(Item),
    Removed(ItemId),
}

impl Outcome {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Enumerated(_) => Verb::Enumerate,
            Self::Created(_) => Verb::Create,
            Self::Updated(_) => Verb::Update,
            Self::Removed(_) => Verb::Remove,
        }
    }
}

/// A state transition applied to the collection, also broadcast to
/// subscribers of [`ItemStore::actions`](crate::ItemStore::actions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Requested {
        op: OperationId,
        verb: Verb,
    },
    Fulfilled {
        op: OperationId,
        outcome: Outcome,
    },
    Rejected {
        op: OperationId,
        verb: Verb,
        message: String,
    },
    /// Explicit "dismiss error" from a subscriber. Not tied to an operation.
    ErrorCleared,
}

impl Action {
    pub fn op(&self) -> Option<OperationId> {
        match self {
            Self::Requested { op, .. } | Self::Fulfilled { op, .. } | Self::Rejected { op, .. } => {
                Some(*op)
            }
            Self::ErrorCleared => None,
        }
    }

    pub fn verb(&self) -> Option<Verb> {
        match self {
            Self::Requested { verb, .. } | Self::Rejected { verb, .. } => Some(*verb),
            Self::Fulfilled { outcome, .. } => Some(outcome.verb()),
            Self::ErrorCleared => None,
        }
    }

    /// `true` for the terminal phases.
    pub fn is_settlement(&self) -> bool {
        matches!(self, Self::Fulfilled { .. } | Self::Rejected { .. })
    }
}
