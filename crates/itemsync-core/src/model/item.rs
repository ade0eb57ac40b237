// ── Item records and operation payloads ──

use serde::{Deserialize, Serialize};

use super::ItemId;
use crate::error::CoreError;

/// A named, priced record held by the store.
///
/// `price` is in minor currency units; formatting is a presentation concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
}

/// Input for a create operation. The service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Field checks for callers that collect input. The store never calls this.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)
    }
}

/// Input for an update operation. `None` fields are left to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self.name {
            Some(ref name) => validate_name(name),
            None => Ok(()),
        }
    }

    /// Fill every absent field from `item`, producing a full replacement.
    pub fn merged_over(&self, item: &Item) -> ItemDraft {
        ItemDraft {
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| item.description.clone()),
            price: self.price.unwrap_or(item.price),
        }
    }
}

impl From<ItemDraft> for ItemPatch {
    fn from(d: ItemDraft) -> Self {
        Self {
            name: Some(d.name),
            description: Some(d.description),
            price: Some(d.price),
        }
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: "name must not be empty".into(),
        });
    }
    Ok(())
}
