//! Shared configuration for itemsync tools.
//!
//! TOML file plus `ITEMSYNC_*` environment overrides, layered with figment,
//! and translation to `itemsync_core::StoreConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use itemsync_core::StoreConfig;
use itemsync_core::config::DEFAULT_BASE_URL;

/// Environment variables with this prefix override file values.
/// Nested keys use `__`, e.g. `ITEMSYNC_SERVICE__URL`.
pub const ENV_PREFIX: &str = "ITEMSYNC_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Where the item service lives.
    #[serde(default)]
    pub service: ServiceSection,

    /// Presentation defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceSection {
    /// Service root URL (e.g., "http://localhost:8000").
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request HTTP timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Per-operation deadline in seconds, enforced by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            operation_timeout_secs: None,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format: "table", "json", "json-compact", "yaml", or "plain".
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_output() -> String {
    "table".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "itemsync", "itemsync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("itemsync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not an
/// error; defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_toml(cfg)?)?;
    Ok(())
}

/// Pretty TOML rendering of `cfg`.
pub fn render_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Translation to the store ────────────────────────────────────────

/// Build a `StoreConfig` from the loaded file/environment values.
pub fn to_store_config(cfg: &Config) -> Result<StoreConfig, ConfigError> {
    let base_url = parse_service_url(&cfg.service.url)?;

    Ok(StoreConfig {
        base_url,
        request_timeout: positive_secs("service.timeout_secs", cfg.service.timeout_secs)?,
        operation_timeout: positive_secs(
            "service.operation_timeout_secs",
            cfg.service.operation_timeout_secs,
        )?,
        user_agent: cfg.service.user_agent.clone(),
    })
}

/// Parse and check a service URL. Only `http` and `https` are accepted.
pub fn parse_service_url(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
        field: "service.url".into(),
        reason: format!("{e}: {raw}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "service.url".into(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}

fn positive_secs(field: &str, secs: Option<u64>) -> Result<Option<Duration>, ConfigError> {
    match secs {
        None => Ok(None),
        Some(0) => Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be at least 1 second".into(),
        }),
        Some(n) => Ok(Some(Duration::from_secs(n))),
    }
}
