// ── Reactive state streams ──
//
// Subscription handle for consuming collection changes from the ItemStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::CollectionState;

/// A subscription to the collection state.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via [`changed()`](Self::changed) or by converting to a
/// `Stream`. Rapid successive changes may be coalesced; the latest state
/// is never skipped.
pub struct StateStream {
    current: Arc<CollectionState>,
    receiver: watch::Receiver<Arc<CollectionState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<CollectionState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or at the last `changed()`).
    pub fn current(&self) -> &Arc<CollectionState> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<CollectionState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if every `ItemStore` handle has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<CollectionState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream`. The first item is the state at the time of
    /// conversion.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StateWatchStream {
    inner: WatchStream<Arc<CollectionState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<CollectionState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
