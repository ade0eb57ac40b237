//! Item command handlers.
//!
//! Every handler goes through the store. When an operation is rejected the
//! store has already recorded `last_error`; that text is what the user sees.

use tabled::Tabled;

use itemsync_core::{CoreError, Item, ItemDraft, ItemId, ItemPatch, ItemStore, ItemsClient};

use crate::cli::{AddArgs, GlobalOpts, OutputFormat, UpdateArgs};
use crate::error::CliError;
use crate::output;

type Store = ItemStore<ItemsClient>;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Price")]
    price: u64,
}

impl From<&Item> for ItemRow {
    fn from(i: &Item) -> Self {
        Self {
            id: i.id.to_string(),
            name: i.name.clone(),
            description: i.description.clone(),
            price: i.price,
        }
    }
}

fn detail(i: &Item) -> String {
    format!(
        "ID:          {}\nName:        {}\nDescription: {}\nPrice:       {}",
        i.id, i.name, i.description, i.price
    )
}

fn render_item(item: &Item, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.format(), item, detail, |i| i.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Pair a rejected operation with what the store recorded for it.
fn failed(store: &Store, err: CoreError) -> CliError {
    CliError::operation(err, store.last_error(), store.remote().base_url().as_str())
}

/// Fresh enumerate, then look `raw_id` up in the resulting state.
async fn lookup(store: &Store, raw_id: &str) -> Result<Item, CliError> {
    store.enumerate().await.map_err(|e| failed(store, e))?;
    let id = ItemId::from(raw_id);
    store
        .snapshot()
        .get(&id)
        .cloned()
        .ok_or_else(|| CliError::NotFound { id: raw_id.into() })
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    store.enumerate().await.map_err(|e| failed(store, e))?;
    let snap = store.snapshot();

    let out = output::render_list(
        global.format(),
        &snap.items,
        |i| ItemRow::from(i),
        |i| i.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);

    if global.format() == OutputFormat::Table {
        let synced = snap
            .last_synced
            .map(|t| format!(" (synced {})", t.format("%H:%M:%S UTC")))
            .unwrap_or_default();
        output::print_status(
            &format!("{} items, total value {}{synced}", snap.len(), snap.total_value()),
            global.quiet,
            global.color,
        );
    }
    Ok(())
}

pub async fn get(store: &Store, raw_id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let item = lookup(store, raw_id).await?;
    render_item(&item, global)
}

pub async fn add(store: &Store, args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let draft = ItemDraft::new(args.name, args.description, args.price);
    draft.validate()?;

    let item = store.create(draft).await.map_err(|e| failed(store, e))?;
    output::print_status(&format!("Item {} created", item.id), global.quiet, global.color);
    render_item(&item, global)
}

/// The service replaces all three fields, so flags left out are filled from
/// the current record before sending.
pub async fn update(store: &Store, args: UpdateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let patch = ItemPatch {
        name: args.name,
        description: args.description,
        price: args.price,
    };
    if patch.is_empty() {
        return Err(CliError::Validation {
            field: "update".into(),
            reason: "nothing to change; pass --name, --description or --price".into(),
        });
    }
    patch.validate()?;

    let current = lookup(store, &args.id).await?;
    let draft = patch.merged_over(&current);
    draft.validate()?;

    let item = store
        .update(current.id, ItemPatch::from(draft))
        .await
        .map_err(|e| failed(store, e))?;
    output::print_status(&format!("Item {} updated", item.id), global.quiet, global.color);
    render_item(&item, global)
}

pub async fn remove(store: &Store, raw_id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let id = store
        .remove(ItemId::from(raw_id))
        .await
        .map_err(|e| failed(store, e))?;
    output::print_status(&format!("Item {id} removed"), global.quiet, global.color);
    if global.format() == OutputFormat::Plain {
        output::print_output(&id.to_string(), global.quiet);
    }
    Ok(())
}

/// Probe the service root. Bypasses the store: nothing here is state.
pub async fn ping(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let url = store.remote().base_url().to_string();
    let message = store
        .remote()
        .service_info()
        .await
        .map_err(|e| CliError::operation(CoreError::from(e), None, &url))?;

    let text = message.unwrap_or_else(|| "service answered".into());
    output::print_output(&format!("{url}: {text}"), global.quiet);
    Ok(())
}
