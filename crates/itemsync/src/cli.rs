//! Clap derive structures for the `itemsync` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// itemsync -- inspect and edit a remote item collection
#[derive(Debug, Parser)]
#[command(
    name = "itemsync",
    version,
    about = "Manage a remote item collection from the command line",
    long_about = "Lists, adds, updates and removes items held by an item service.\n\n\
        Every command runs through the same store a UI would subscribe to, so\n\
        failures are reported exactly as the store records them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Item service URL (overrides config)
    #[arg(long, short = 'u', env = "ITEMSYNC_URL", global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "ITEMSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format (default from config, else table)
    #[arg(long, short = 'o', env = "ITEMSYNC_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

impl GlobalOpts {
    /// The output format once config defaults have been folded in.
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every item
    #[command(alias = "ls")]
    List,

    /// Show one item
    Get {
        /// Item id
        id: String,
    },

    /// Add a new item
    Add(AddArgs),

    /// Update fields of an existing item
    Update(UpdateArgs),

    /// Remove an item
    #[command(alias = "rm")]
    Remove {
        /// Item id
        id: String,
    },

    /// Check that the item service answers
    Ping,

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Item name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Free-form description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Price in minor currency units
    #[arg(long, short = 'p')]
    pub price: u64,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Item id
    pub id: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New price in minor currency units
    #[arg(long, short = 'p')]
    pub price: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the effective configuration
    Show,

    /// Write a config file with the given service URL
    Init {
        /// Service URL to store (default: http://localhost:8000)
        #[arg(long)]
        service_url: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
