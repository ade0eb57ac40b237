// ── Core error types ──
//
// Errors surfaced by the item store. Consumers never see reqwest errors or
// raw JSON failures directly: `From<itemsync_api::Error>` folds them into
// the variants below, and `failure_message` turns any of them into the text
// stored in `CollectionState::last_error`.

use thiserror::Error;

use crate::action::Verb;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach item service: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Operation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Service errors ───────────────────────────────────────────────
    #[error(
        "Item service rejected the request{}: {}",
        .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default(),
        .message.as_deref().unwrap_or("no details")
    )]
    Api {
        status: Option<u16>,
        /// Message extracted from the response, if the service sent one.
        message: Option<String>,
    },

    /// A success response that cannot become an `Item` (e.g. no id).
    #[error("Malformed response from item service: {reason}")]
    MalformedResponse { reason: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The text recorded in `last_error` when an operation of `verb` fails
    /// with this error.
    ///
    /// Transport failures get a generic message. Service rejections use the
    /// service's own message when it sent one, and the verb's default
    /// otherwise.
    pub fn failure_message(&self, verb: Verb) -> String {
        let default = verb.failure_message();
        match self {
            Self::ConnectionFailed { .. } => {
                "Network error: could not reach the item service".into()
            }
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Api { message: None, .. } => default.into(),
            Self::Timeout { timeout_secs } => format!("{default}: timed out after {timeout_secs}s"),
            Self::MalformedResponse { reason } => format!("{default}: malformed response ({reason})"),
            Self::ValidationFailed { message } => format!("{default}: {message}"),
            Self::Config { message } => format!("{default}: {message}"),
            Self::Internal(message) => format!("{default}: {message}"),
        }
    }

    /// HTTP status reported by the service, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<itemsync_api::Error> for CoreError {
    fn from(err: itemsync_api::Error) -> Self {
        match err {
            itemsync_api::Error::Transport(ref e) => match e.status() {
                Some(status) => CoreError::Api {
                    status: Some(status.as_u16()),
                    message: None,
                },
                None => CoreError::ConnectionFailed {
                    reason: e.to_string(),
                },
            },
            itemsync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            itemsync_api::Error::Api { status, message } => CoreError::Api {
                status: Some(status),
                message,
            },
            itemsync_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { reason: message }
            }
        }
    }
}
