//! Reactive item store between `itemsync-api` and its consumers.
//!
//! - **[`ItemStore`]**: Owns one [`CollectionState`] and runs the four
//!   remote operations ([`enumerate`](ItemStore::enumerate),
//!   [`create`](ItemStore::create), [`update`](ItemStore::update),
//!   [`remove`](ItemStore::remove)). Local state changes only when a remote
//!   call settles; there is no optimistic update, retry, or cancellation.
//!
//! - **[`Action`]**: Tagged lifecycle transitions
//!   (`Requested` / `Fulfilled` / `Rejected`). [`apply`] is the pure
//!   reconciliation rule that folds an action into the state.
//!
//! - **[`StateStream`]**: Subscription handle vended by the store, with
//!   `current()` / `latest()` / `changed()` and a `Stream` adapter.
//!
//! - **[`RemoteItemService`]**: The seam to the authoritative store,
//!   implemented for [`itemsync_api::ItemsClient`].
//!
//! Concurrent operations settle in arbitrary order and are reconciled in
//! that order. `last_error` is one slot shared by all verbs: the last
//! failure to settle wins.

pub mod action;
pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod remote;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, OperationId, Outcome, Verb};
pub use command::Command;
pub use config::StoreConfig;
pub use error::CoreError;
pub use model::{Item, ItemDraft, ItemId, ItemPatch};
pub use remote::RemoteItemService;
pub use store::{CollectionState, ItemStore, apply};
pub use stream::{StateStream, StateWatchStream};

/// The HTTP client behind [`ItemStore::connect`].
pub use itemsync_api::ItemsClient;
