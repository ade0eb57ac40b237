// Scripted remote for store tests.
//
// Every call parks until the test answers it, so tests decide the order in
// which concurrent operations settle.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::{Notify, oneshot};

use itemsync_api::{ItemRecord, RecordId};
use itemsync_core::{CoreError, ItemDraft, ItemId, ItemPatch, ItemStore, RemoteItemService};

pub type Store = ItemStore<GatedRemote>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(ItemDraft),
    Replace(ItemId, ItemPatch),
    Delete(ItemId),
}

#[derive(Debug)]
pub enum Reply {
    Items(Vec<ItemRecord>),
    Record(ItemRecord),
    Deleted(Option<ItemId>),
}

pub struct PendingCall {
    pub call: Call,
    reply: oneshot::Sender<Result<Reply, CoreError>>,
}

impl PendingCall {
    pub fn succeed(self, reply: Reply) {
        let _ = self.reply.send(Ok(reply));
    }

    pub fn fail(self, err: CoreError) {
        let _ = self.reply.send(Err(err));
    }

    /// Fail the way the item service does: an error with a message.
    pub fn reject(self, message: &str) {
        self.fail(CoreError::Api {
            status: Some(400),
            message: Some(message.into()),
        });
    }
}

#[derive(Clone, Default)]
pub struct GatedRemote {
    inner: Arc<Gate>,
}

#[derive(Default)]
struct Gate {
    calls: Mutex<VecDeque<PendingCall>>,
    arrived: Notify,
}

impl GatedRemote {
    /// Wait for the next call that reached the remote.
    pub async fn next_call(&self) -> PendingCall {
        loop {
            if let Some(call) = self.inner.calls.lock().unwrap().pop_front() {
                return call;
            }
            self.inner.arrived.notified().await;
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }

    async fn wait(&self, call: Call) -> Result<Reply, CoreError> {
        let (tx, rx) = oneshot::channel();
        {
            let mut calls = self.inner.calls.lock().unwrap();
            calls.push_back(PendingCall { call, reply: tx });
        }
        self.inner.arrived.notify_one();
        rx.await
            .unwrap_or_else(|_| Err(CoreError::Internal("call abandoned by test".into())))
    }
}

impl RemoteItemService for GatedRemote {
    async fn list(&self) -> Result<Vec<ItemRecord>, CoreError> {
        match self.wait(Call::List).await? {
            Reply::Items(items) => Ok(items),
            other => panic!("list answered with {other:?}"),
        }
    }

    async fn create(&self, draft: &ItemDraft) -> Result<ItemRecord, CoreError> {
        match self.wait(Call::Create(draft.clone())).await? {
            Reply::Record(rec) => Ok(rec),
            other => panic!("create answered with {other:?}"),
        }
    }

    async fn replace(&self, id: &ItemId, patch: &ItemPatch) -> Result<ItemRecord, CoreError> {
        match self.wait(Call::Replace(id.clone(), patch.clone())).await? {
            Reply::Record(rec) => Ok(rec),
            other => panic!("replace answered with {other:?}"),
        }
    }

    async fn delete(&self, id: &ItemId) -> Result<Option<ItemId>, CoreError> {
        match self.wait(Call::Delete(id.clone())).await? {
            Reply::Deleted(echo) => Ok(echo),
            other => panic!("delete answered with {other:?}"),
        }
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn store() -> (Store, GatedRemote) {
    let remote = GatedRemote::default();
    (ItemStore::new(remote.clone()), remote)
}

pub fn record(id: u64, name: &str, price: i64) -> ItemRecord {
    ItemRecord {
        id: Some(RecordId::Number(id)),
        name: Some(name.into()),
        description: Some(String::new()),
        price: Some(price),
    }
}

pub fn ids(store: &Store) -> Vec<ItemId> {
    store.items().into_iter().map(|i| i.id).collect()
}

/// Run one enumerate to completion, answering it with `records`.
pub async fn seed(store: &Store, remote: &GatedRemote, records: Vec<ItemRecord>) {
    let task = store.dispatch(itemsync_core::Command::Enumerate);
    remote.next_call().await.succeed(Reply::Items(records));
    task.await.unwrap().unwrap();
}
