// ── Wire-contract adaptation ──
//
// Maps `itemsync_api` wire types to and from the domain model. A record
// that cannot become a complete `Item` is an error, never a partial entry.

use itemsync_api::{ItemPatchPayload, ItemPayload, ItemRecord, RecordId};

use crate::error::CoreError;
use crate::model::{Item, ItemDraft, ItemId, ItemPatch};

impl From<RecordId> for ItemId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Number(n) => ItemId::Numeric(n),
            RecordId::Text(s) => ItemId::from(s),
        }
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = CoreError;

    fn try_from(rec: ItemRecord) -> Result<Self, Self::Error> {
        let id = rec.id.map(ItemId::from).ok_or_else(|| malformed("missing id"))?;
        let name = rec
            .name
            .ok_or_else(|| malformed(&format!("item {id} has no name")))?;
        let price = match rec.price {
            Some(p) => u64::try_from(p)
                .map_err(|_| malformed(&format!("item {id} has negative price {p}")))?,
            None => return Err(malformed(&format!("item {id} has no price"))),
        };

        Ok(Item {
            id,
            name,
            description: rec.description.unwrap_or_default(),
            price,
        })
    }
}

/// Convert an enumeration result. One bad record rejects the whole batch.
pub(crate) fn items_from_records(records: Vec<ItemRecord>) -> Result<Vec<Item>, CoreError> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, rec)| {
            Item::try_from(rec).map_err(|e| match e {
                CoreError::MalformedResponse { reason } => malformed(&format!("record {idx}: {reason}")),
                other => other,
            })
        })
        .collect()
}

impl From<&ItemDraft> for ItemPayload {
    fn from(d: &ItemDraft) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone(),
            price: d.price,
        }
    }
}

impl From<&ItemPatch> for ItemPatchPayload {
    fn from(p: &ItemPatch) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
        }
    }
}

fn malformed(reason: &str) -> CoreError {
    CoreError::MalformedResponse {
        reason: reason.to_owned(),
    }
}
