// ── Remote item service seam ──
//
// The store talks to the authoritative store only through this trait.
// `ItemsClient` is the HTTP implementation; tests substitute scripted fakes.

use std::future::Future;

use itemsync_api::{ItemPatchPayload, ItemPayload, ItemRecord, ItemsClient};
use tracing::warn;

use crate::error::CoreError;
use crate::model::{ItemDraft, ItemId, ItemPatch};

/// The four operations of the remote item service.
///
/// Implementations return wire records unchanged; turning them into
/// `Item`s (and rejecting malformed ones) is the store's job.
pub trait RemoteItemService: Send + Sync + 'static {
    /// Enumerate every item.
    fn list(&self) -> impl Future<Output = Result<Vec<ItemRecord>, CoreError>> + Send;

    /// Create an item; the response carries the assigned id.
    fn create(
        &self,
        draft: &ItemDraft,
    ) -> impl Future<Output = Result<ItemRecord, CoreError>> + Send;

    /// Replace the fields of `id`.
    fn replace(
        &self,
        id: &ItemId,
        patch: &ItemPatch,
    ) -> impl Future<Output = Result<ItemRecord, CoreError>> + Send;

    /// Delete `id`. Returns the identifier the service echoed, if any.
    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<Option<ItemId>, CoreError>> + Send;
}

impl RemoteItemService for ItemsClient {
    async fn list(&self) -> Result<Vec<ItemRecord>, CoreError> {
        Ok(self.list_items().await?)
    }

    async fn create(&self, draft: &ItemDraft) -> Result<ItemRecord, CoreError> {
        Ok(self.create_item(&ItemPayload::from(draft)).await?)
    }

    async fn replace(&self, id: &ItemId, patch: &ItemPatch) -> Result<ItemRecord, CoreError> {
        let record = self
            .update_item(&id.to_string(), &ItemPatchPayload::from(patch))
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: &ItemId) -> Result<Option<ItemId>, CoreError> {
        let receipt = self.delete_item(&id.to_string()).await?;
        let echoed = receipt.id().cloned().map(ItemId::from);
        if let Some(ref other) = echoed {
            if other != id {
                warn!(requested = %id, echoed = %other, "delete echoed a different id");
            }
        }
        Ok(echoed)
    }
}
