// ── Reconciliation rules ──
//
// One deterministic rule per action. Rules always operate on the current
// state, so results land in settlement order, not invocation order.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use super::CollectionState;
use crate::action::{Action, Outcome, Verb};
use crate::model::Item;

/// Apply `action` to `state`. Returns `true` if anything observable changed.
pub fn apply(state: &mut CollectionState, action: &Action) -> bool {
    match action {
        Action::Requested { verb, .. } => match verb {
            Verb::Enumerate => {
                state.pending_enumerates += 1;
                state.busy = true;
                state.last_error = None;
                true
            }
            // Mutations are never applied speculatively.
            Verb::Create | Verb::Update | Verb::Remove => false,
        },

        Action::Fulfilled { outcome, .. } => {
            match outcome {
                Outcome::Enumerated(items) => {
                    state.items = dedup_by_id(items);
                    state.last_synced = Some(Utc::now());
                    finish_enumerate(state);
                }
                Outcome::Created(item) => {
                    if let Some(slot) = state.items.iter_mut().find(|i| i.id == item.id) {
                        // A concurrent enumerate already delivered it.
                        debug!(id = %item.id, "created item already present, replacing");
                        *slot = item.clone();
                    } else {
                        state.items.push(item.clone());
                    }
                }
                Outcome::Updated(item) => {
                    match state.items.iter_mut().find(|i| i.id == item.id) {
                        Some(slot) => *slot = item.clone(),
                        None => {
                            debug!(id = %item.id, "updated item not in collection, dropping");
                            return false;
                        }
                    }
                }
                Outcome::Removed(id) => {
                    let Some(pos) = state.items.iter().position(|i| &i.id == id) else {
                        debug!(%id, "removed item not in collection");
                        return false;
                    };
                    state.items.remove(pos);
                }
            }
            true
        }

        Action::Rejected { verb, message, .. } => {
            state.last_error = Some(message.clone());
            if *verb == Verb::Enumerate {
                finish_enumerate(state);
            }
            true
        }

        Action::ErrorCleared => state.last_error.take().is_some(),
    }
}

fn finish_enumerate(state: &mut CollectionState) {
    state.pending_enumerates = state.pending_enumerates.saturating_sub(1);
    state.busy = state.pending_enumerates > 0;
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_by_id(items: &[Item]) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());
    let unique: Vec<Item> = items
        .iter()
        .filter(|i| seen.insert(i.id.clone()))
        .cloned()
        .collect();
    if unique.len() != items.len() {
        warn!(
            dropped = items.len() - unique.len(),
            "enumeration contained duplicate ids"
        );
    }
    unique
}
