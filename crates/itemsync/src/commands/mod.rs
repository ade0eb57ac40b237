//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod config_cmd;
pub mod items;

use itemsync_core::{ItemStore, ItemsClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a store-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    store: &ItemStore<ItemsClient>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List => items::list(store, global).await,
        Command::Get { id } => items::get(store, &id, global).await,
        Command::Add(args) => items::add(store, args, global).await,
        Command::Update(args) => items::update(store, args, global).await,
        Command::Remove { id } => items::remove(store, &id, global).await,
        Command::Ping => items::ping(store, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
