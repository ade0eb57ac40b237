//! CLI configuration: thin wrapper around `itemsync_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --timeout, --output).

use std::time::Duration;

use clap::ValueEnum;

use itemsync_core::StoreConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use itemsync_config::{Config, config_path, load_config, render_toml, save_config};

/// Translate config file values + global flags into a `StoreConfig`.
///
/// CLI flag overrides take priority over file and environment values.
pub fn resolve_store_config(cfg: &Config, global: &GlobalOpts) -> Result<StoreConfig, CliError> {
    let mut store = itemsync_config::to_store_config(cfg)?;

    if let Some(ref raw) = global.url {
        store.base_url = itemsync_config::parse_service_url(raw)?;
    }
    match global.timeout {
        Some(0) => {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Some(secs) => store.request_timeout = Some(Duration::from_secs(secs)),
        None => {}
    }

    Ok(store)
}

/// `--output` wins; otherwise the config's `defaults.output`, else table.
pub fn resolve_output(cfg: &Config, global: &GlobalOpts) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or_else(|_| {
            tracing::warn!(value = %cfg.defaults.output, "unknown defaults.output, using table");
            OutputFormat::Table
        })
    })
}
