// ── Runtime store configuration ──
//
// Describes *where* the item service lives and how long to wait for it.
// Never touches disk; `itemsync-config` builds one of these from files
// and environment.

use std::time::Duration;

use itemsync_api::TransportConfig;
use url::Url;

/// The reference deployment serves the API here.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for an HTTP-backed [`ItemStore`](crate::ItemStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Service root; item endpoints live under `{base_url}/items/`.
    pub base_url: Url,
    /// Per-request HTTP timeout. `None` (default) waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Per-operation deadline enforced by the store. `None` (default) waits
    /// indefinitely, which leaves `busy` set for as long as an enumerate hangs.
    pub operation_timeout: Option<Duration>,
    /// Overrides the default `itemsync/<version>` user agent.
    pub user_agent: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: None,
            operation_timeout: None,
            user_agent: None,
        }
    }
}

impl StoreConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let mut transport = TransportConfig {
            timeout: self.request_timeout,
            ..TransportConfig::default()
        };
        if let Some(ref agent) = self.user_agent {
            transport.user_agent.clone_from(agent);
        }
        transport
    }
}
