//! CLI error types with miette diagnostics.
//!
//! A failed store operation surfaces the store's own `last_error` text;
//! the underlying `CoreError` picks the exit code and help.

use miette::Diagnostic;
use thiserror::Error;

use itemsync_config::ConfigError;
use itemsync_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Store operations ─────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(itemsync::operation_failed), help("{hint}"))]
    OperationFailed {
        message: String,
        hint: String,
        #[source]
        source: CoreError,
    },

    // ── Lookups ──────────────────────────────────────────────────────

    #[error("item '{id}' not found")]
    #[diagnostic(
        code(itemsync::not_found),
        help("Run: itemsync list to see available items")
    )]
    NotFound { id: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(itemsync::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(itemsync::config),
        help("Check the file at: itemsync config path")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(code(itemsync::config_exists), help("Pass --force to overwrite it."))]
    ConfigExists { path: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(itemsync::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(itemsync::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Wrap a rejected store operation. `recorded` is the store's
    /// `last_error` at the time; it wins over the error's own text.
    pub fn operation(source: CoreError, recorded: Option<String>, url: &str) -> Self {
        let hint = match source {
            CoreError::ConnectionFailed { .. } => format!(
                "Check that the item service is running and reachable.\nURL: {url}"
            ),
            CoreError::Timeout { .. } => {
                "Increase the limit with --timeout or check service responsiveness.".into()
            }
            CoreError::MalformedResponse { .. } => {
                "The service answered with a record this client cannot use.".into()
            }
            CoreError::Api {
                status: Some(404), ..
            } => "Run: itemsync list to see available items".into(),
            _ => "Run with -v for request details.".into(),
        };
        Self::OperationFailed {
            message: recorded.unwrap_or_else(|| source.to_string()),
            hint,
            source,
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OperationFailed { source, .. } => match source {
                CoreError::ConnectionFailed { .. } => exit_code::CONNECTION,
                CoreError::Timeout { .. } => exit_code::TIMEOUT,
                CoreError::ValidationFailed { .. } => exit_code::USAGE,
                CoreError::Api {
                    status: Some(404), ..
                } => exit_code::NOT_FOUND,
                CoreError::Api {
                    status: Some(409), ..
                } => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

/// Collaborator-side failures that never reached the store.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "item".into(),
                reason: message,
            },
            CoreError::Config { message } => Self::Validation {
                field: "url".into(),
                reason: message,
            },
            other => Self::operation(other, None, "(unknown)"),
        }
    }
}
