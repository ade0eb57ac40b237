// Wire types for the item service.
//
// Response records are deliberately lenient: every field is optional so the
// core can tell *which* part of a malformed record is missing instead of
// failing the whole decode.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Identifier as it appears on the wire: a JSON integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ── Requests ─────────────────────────────────────────────────────────

/// Full item body for `POST /items/` and `PUT /items/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: String,
    pub price: u64,
}

/// Partial item body for `PUT /items/{id}`. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

impl From<ItemPayload> for ItemPatchPayload {
    fn from(p: ItemPayload) -> Self {
        Self {
            name: Some(p.name),
            description: Some(p.description),
            price: Some(p.price),
        }
    }
}

// ── Responses ────────────────────────────────────────────────────────

/// An item as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Signed on the wire so a negative price decodes and can be rejected
    /// with a precise reason.
    #[serde(default)]
    pub price: Option<i64>,
}

/// What the service answered to `DELETE /items/{id}`.
///
/// The contract allows the removed identifier or nothing at all; the
/// reference backend answers with an acknowledgment message instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteReceipt {
    Empty,
    Id(RecordId),
    Acknowledged { message: String },
    Other(serde_json::Value),
}

impl DeleteReceipt {
    /// Classify a raw response body. Never fails: anything unrecognised
    /// is kept as `Other`.
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
            return Self::Other(serde_json::Value::String(trimmed.to_owned()));
        };
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Empty,
            serde_json::Value::Object(ref map) => {
                if let Some(id) = map
                    .get("id")
                    .and_then(|v| serde_json::from_value::<RecordId>(v.clone()).ok())
                {
                    return Self::Id(id);
                }
                if let Some(message) = map.get("message").and_then(|v| v.as_str()) {
                    return Self::Acknowledged {
                        message: message.to_owned(),
                    };
                }
                Self::Other(value)
            }
            other => match serde_json::from_value::<RecordId>(other.clone()) {
                Ok(id) => Self::Id(id),
                Err(_) => Self::Other(other),
            },
        }
    }

    /// The identifier echoed by the service, if any.
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Id(id) => Some(id),
            _ => None,
        }
    }
}
