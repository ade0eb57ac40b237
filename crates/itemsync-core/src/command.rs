// ── Command API ──
//
// Fire-and-forget form of the four operations, for subscribers that
// dispatch without awaiting. See `ItemStore::dispatch`.

use crate::action::Verb;
use crate::model::{ItemDraft, ItemId, ItemPatch};

/// One invocation of a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enumerate,
    Create { draft: ItemDraft },
    Update { id: ItemId, patch: ItemPatch },
    Remove { id: ItemId },
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Enumerate => Verb::Enumerate,
            Self::Create { .. } => Verb::Create,
            Self::Update { .. } => Verb::Update,
            Self::Remove { .. } => Verb::Remove,
        }
    }
}
