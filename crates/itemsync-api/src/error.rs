use thiserror::Error;

/// Top-level error type for the `itemsync-api` crate.
///
/// Covers every failure mode of the item service surface: transport,
/// URL construction, non-success responses, and undecodable bodies.
/// `itemsync-core` maps these into the messages subscribers see.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-success status from the item service.
    ///
    /// `message` is the service's `detail`/`message` field when present,
    /// otherwise the raw body text. `None` when the body said nothing.
    #[error(
        "Item service error (HTTP {status}): {}",
        .message.as_deref().unwrap_or("no details")
    )]
    Api {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this workspace retries; the classification is exposed
    /// for callers that want to.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
