//! SnapshotCell - the store's single shared slot.
//!
//! Holds the current immutable snapshot and multicasts every replacement:
//! a last-value mailbox plus a fan-out list of per-subscriber unbounded
//! senders. New subscribers receive the current snapshot immediately, then
//! every subsequent published snapshot in publish order.
//!
//! The cell knows nothing about reducers or commits; it only stores and
//! notifies.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Last-value slot with multicast notification.
///
/// Snapshots are handed out as `Arc<S>`; a clone taken from any past
/// publication stays valid and untouched by later publications.
pub struct SnapshotCell<S> {
    inner: Mutex<CellInner<S>>,
}

struct CellInner<S> {
    current: Arc<S>,
    subscribers: Vec<mpsc::UnboundedSender<Arc<S>>>,
}

impl<S> SnapshotCell<S> {
    /// Create a cell holding `initial` as the current snapshot.
    pub fn new(initial: S) -> Self {
        Self {
            inner: Mutex::new(CellInner {
                current: Arc::new(initial),
                subscribers: Vec::new(),
            }),
        }
    }

    // No user code ever runs while the lock is held, so a poisoned lock can
    // only mean a panic mid-notification; the slot itself is still intact.
    fn lock(&self) -> std::sync::MutexGuard<'_, CellInner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The latest snapshot, synchronously.
    pub fn current(&self) -> Arc<S> {
        self.lock().current.clone()
    }

    /// Register a subscriber.
    ///
    /// The returned stream yields the snapshot current at subscribe time as
    /// its first item, then every subsequently published snapshot, in
    /// publish order, until dropped. Registration and the replay of the
    /// current value happen under one lock, so no publication can fall into
    /// the gap between them.
    pub fn subscribe(&self) -> UnboundedReceiverStream<Arc<S>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        UnboundedReceiverStream::new(rx)
    }

    /// Replace the current snapshot and notify all subscribers in
    /// registration order. Subscribers whose stream was dropped are pruned.
    pub fn publish(&self, next: Arc<S>) {
        let mut inner = self.lock();
        inner.current = next.clone();
        inner
            .subscribers
            .retain(|tx| tx.send(next.clone()).is_ok());
    }

    /// Number of live subscribers (post-prune count as of the last publish).
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for SnapshotCell<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCell")
            .field("current", &self.lock().current)
            .finish_non_exhaustive()
    }
}
