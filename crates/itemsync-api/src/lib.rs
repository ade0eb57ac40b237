// itemsync-api: Async Rust client for the item service REST API
//
// One resource (`/items/`) with list/get/create/update/delete. The client
// speaks the wire contract only; reconciliation lives in `itemsync-core`.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ItemsClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{DeleteReceipt, ItemPatchPayload, ItemPayload, ItemRecord, RecordId};
