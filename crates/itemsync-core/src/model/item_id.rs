// ── Item identity ──
//
// Identifiers are assigned by the item service and opaque to the store.
// The reference service hands out integers; anything else is kept as text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for an item.
///
/// Serializes back to the same JSON shape it arrived in (number or string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Text(String),
}

impl ItemId {
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Text(s),
        }
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}
