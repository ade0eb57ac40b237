// ── Collection state ──
//
// The single in-memory mirror of the remote item set plus busy/error
// metadata. Only `reconcile::apply` mutates it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Item, ItemId};

/// Snapshot of everything subscribers can observe.
///
/// Invariants maintained by reconciliation:
/// - at most one entry per `id` in `items`;
/// - `busy` is `true` exactly while an enumerate is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionState {
    /// Items in arrival order.
    pub items: Vec<Item>,
    pub busy: bool,
    /// Message from the most recently settled failing operation, of any verb.
    pub last_error: Option<String>,
    /// When the last enumerate was fulfilled.
    pub last_synced: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub(crate) pending_enumerates: usize,
}

impl CollectionState {
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of enumerate operations dispatched and not yet settled.
    pub fn pending_enumerates(&self) -> usize {
        self.pending_enumerates
    }

    /// Sum of all prices, in minor units. Saturates instead of wrapping.
    pub fn total_value(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.price))
    }

    /// How long ago the last enumerate was fulfilled, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_synced.map(|t| Utc::now() - t)
    }
}
