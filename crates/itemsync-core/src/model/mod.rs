mod item;
mod item_id;

pub use item::{Item, ItemDraft, ItemPatch};
pub use item_id::ItemId;
