// Shared transport configuration for building reqwest::Client instances.
//
// The item service has no request deadline of its own. `timeout` stays
// `None` unless a caller opts in.

use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("itemsync/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// TCP connect timeout. `None` uses the OS default.
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        Ok(builder.build()?)
    }

    /// Set a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
