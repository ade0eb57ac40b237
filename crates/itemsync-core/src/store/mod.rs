// ── Item store ──
//
// Owns the collection state and runs the four operations against a
// `RemoteItemService`. Each invocation is an independent task: it applies
// `Requested`, awaits the remote, then applies `Fulfilled` or `Rejected`.
// The task outlives its caller, so dropping the returned future never
// leaves an operation unsettled. Operations need a Tokio runtime.
// Settlements are applied one at a time inside the watch channel's lock,
// in whatever order they arrive.

mod reconcile;
mod state;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub use reconcile::apply;
pub use state::CollectionState;

use crate::action::{Action, OperationId, Outcome, Verb};
use crate::command::Command;
use crate::config::StoreConfig;
use crate::convert::items_from_records;
use crate::error::CoreError;
use crate::model::{Item, ItemDraft, ItemId, ItemPatch};
use crate::remote::RemoteItemService;
use crate::stream::StateStream;

const ACTION_CHANNEL_SIZE: usize = 256;

/// Observable item collection kept in line with a remote item service.
///
/// Cheaply cloneable via `Arc<StoreInner>`; every clone shares the same
/// state. Construct as many independent stores as needed.
pub struct ItemStore<R: RemoteItemService> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R> {
    remote: R,
    state: watch::Sender<Arc<CollectionState>>,
    actions: broadcast::Sender<Action>,
    next_op: AtomicU64,
    /// Upper bound on a single remote call. `None` waits forever.
    operation_timeout: Option<Duration>,
}

impl<R: RemoteItemService> Clone for ItemStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ItemStore<itemsync_api::ItemsClient> {
    /// Build a store backed by the HTTP item service described in `config`.
    pub fn connect(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = itemsync_api::ItemsClient::new(config.base_url.as_str(), &config.transport())?;
        debug!(url = %config.base_url, "item store configured");
        Ok(Self::with_operation_timeout(client, config.operation_timeout))
    }
}

impl<R: RemoteItemService> ItemStore<R> {
    /// Create an empty store with no operation timeout.
    pub fn new(remote: R) -> Self {
        Self::with_operation_timeout(remote, None)
    }

    /// Create an empty store whose remote calls are abandoned after `timeout`.
    ///
    /// An abandoned call settles as rejected; the request itself is not
    /// cancelled on the service side.
    pub fn with_operation_timeout(remote: R, timeout: Option<Duration>) -> Self {
        let (state, _) = watch::channel(Arc::new(CollectionState::default()));
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_SIZE);

        Self {
            inner: Arc::new(StoreInner {
                remote,
                state,
                actions,
                next_op: AtomicU64::new(1),
                operation_timeout: timeout,
            }),
        }
    }

    /// The backing remote service.
    pub fn remote(&self) -> &R {
        &self.inner.remote
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the full collection and replace `items` with it.
    ///
    /// Errors are already recorded in `last_error` when this returns; the
    /// `Err` is informational.
    pub async fn enumerate(&self) -> Result<Vec<Item>, CoreError> {
        let items = self
            .detached(
                Verb::Enumerate,
                |store| async move {
                    store
                        .call(store.inner.remote.list())
                        .await
                        .and_then(items_from_records)
                },
                |items: &Vec<Item>| Outcome::Enumerated(items.clone()),
            )
            .await?;
        info!(count = items.len(), "items enumerated");
        Ok(items)
    }

    /// Create an item and append the service's copy to `items`.
    pub async fn create(&self, draft: ItemDraft) -> Result<Item, CoreError> {
        let item = self
            .detached(
                Verb::Create,
                move |store| async move {
                    store
                        .call(store.inner.remote.create(&draft))
                        .await
                        .and_then(Item::try_from)
                },
                |item: &Item| Outcome::Created(item.clone()),
            )
            .await?;
        info!(id = %item.id, "item created");
        Ok(item)
    }

    /// Update `id` and replace the matching entry with the service's copy.
    ///
    /// If no entry with the returned id exists when the call settles, the
    /// returned item is dropped rather than inserted.
    pub async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Item, CoreError> {
        let item = self
            .detached(
                Verb::Update,
                move |store| async move {
                    store
                        .call(store.inner.remote.replace(&id, &patch))
                        .await
                        .and_then(Item::try_from)
                },
                |item: &Item| Outcome::Updated(item.clone()),
            )
            .await?;
        info!(id = %item.id, "item updated");
        Ok(item)
    }

    /// Delete `id` and drop the matching entry, if any.
    pub async fn remove(&self, id: ItemId) -> Result<ItemId, CoreError> {
        let id = self
            .detached(
                Verb::Remove,
                move |store| async move {
                    let result = store.call(store.inner.remote.delete(&id)).await;
                    result.map(|_echoed| id)
                },
                |id: &ItemId| Outcome::Removed(id.clone()),
            )
            .await?;
        info!(%id, "item removed");
        Ok(id)
    }

    /// Dismiss the current `last_error`.
    pub fn clear_error(&self) {
        self.apply(Action::ErrorCleared);
    }

    /// Spawn `cmd` as an independent task without awaiting it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, cmd: Command) -> JoinHandle<Result<(), CoreError>> {
        let store = self.clone();
        debug!(verb = %cmd.verb(), "dispatching command");
        tokio::spawn(async move {
            match cmd {
                Command::Enumerate => store.enumerate().await.map(drop),
                Command::Create { draft } => store.create(draft).await.map(drop),
                Command::Update { id, patch } => store.update(id, patch).await.map(drop),
                Command::Remove { id } => store.remove(id).await.map(drop),
            }
        })
    }

    // ── State observation ────────────────────────────────────────────

    /// Current state (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<CollectionState> {
        self.inner.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<Item> {
        self.inner.state.borrow().items.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.state.borrow().busy
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.state.borrow().last_error.clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.inner.state.subscribe())
    }

    /// Subscribe to the lifecycle feed (every applied action, in applied order).
    pub fn actions(&self) -> broadcast::Receiver<Action> {
        self.inner.actions.subscribe()
    }

    // ── Lifecycle plumbing ───────────────────────────────────────────

    fn begin(&self, verb: Verb) -> OperationId {
        let op = OperationId(self.inner.next_op.fetch_add(1, Ordering::Relaxed));
        debug!(%op, %verb, "operation requested");
        self.apply(Action::Requested { op, verb });
        op
    }

    /// Run `remote` and its settlement on a task of its own.
    ///
    /// The operation settles even if the caller's future is dropped, so
    /// every `Requested` is matched by exactly one `Fulfilled` or `Rejected`.
    async fn detached<T, F, Fut>(
        &self,
        verb: Verb,
        remote: F,
        outcome: fn(&T) -> Outcome,
    ) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let op = self.begin(verb);
        let store = self.clone();
        let work = remote(self.clone());
        let task = tokio::spawn(async move {
            let result = work.await;
            store.settle(op, verb, result, outcome)
        });

        match task.await {
            Ok(result) => result,
            // The task panicked before settling; settle on its behalf.
            Err(join_err) => self.settle(
                op,
                verb,
                Err(CoreError::Internal(format!("operation task failed: {join_err}"))),
                outcome,
            ),
        }
    }

    async fn call<T>(
        &self,
        fut: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        match self.inner.operation_timeout {
            None => fut.await,
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| CoreError::Timeout {
                    timeout_secs: limit.as_secs(),
                })?,
        }
    }

    /// Record the settlement of `op` and hand the result back to the caller.
    fn settle<T>(
        &self,
        op: OperationId,
        verb: Verb,
        result: Result<T, CoreError>,
        outcome: impl FnOnce(&T) -> Outcome,
    ) -> Result<T, CoreError> {
        match result {
            Ok(value) => {
                self.apply(Action::Fulfilled {
                    op,
                    outcome: outcome(&value),
                });
                Ok(value)
            }
            Err(err) => {
                let message = err.failure_message(verb);
                warn!(%op, %verb, error = %err, "operation rejected");
                self.apply(Action::Rejected { op, verb, message });
                Err(err)
            }
        }
    }

    /// Reduce and broadcast under the watch lock, so the action feed sees
    /// settlements in the order they were applied.
    fn apply(&self, action: Action) {
        let actions = &self.inner.actions;
        self.inner.state.send_if_modified(|snap| {
            let changed = reconcile::apply(Arc::make_mut(snap), &action);
            // No receivers is fine.
            let _ = actions.send(action);
            changed
        });
    }
}
