//! Store Layer - Core Traits
//!
//! Defines the remote task store interface.
//! Implementations can be a hosted realtime database, in-memory, etc.

use async_trait::async_trait;
use std::fmt;

use crate::domain::{StoreResult, TaskId};
use crate::snapshot::Snapshot;

/// Listener for full collection snapshots; `None` means no data
pub type SnapshotCallback = Box<dyn Fn(Option<&Snapshot>)>;

/// Remote task collection with live, full-snapshot subscriptions.
///
/// Stores run on a single-threaded event loop, so neither the trait objects
/// nor their futures are `Send`.
#[async_trait(?Send)]
pub trait TaskStore {
    /// Write `{task: text}` under a freshly generated key
    async fn create(&self, text: &str) -> StoreResult<TaskId>;

    /// Register a live listener on the collection.
    ///
    /// The current value is delivered right away, then again after every
    /// change made by any client. Each delivery is the whole collection.
    fn subscribe(&self, on_snapshot: SnapshotCallback) -> StoreResult<Subscription>;

    /// Delete the record at `users/tasks/<id>`
    async fn remove(&self, id: &TaskId) -> StoreResult<()>;
}

/// Handle to a live listener.
///
/// Detaches exactly once: on `unsubscribe()` or when dropped.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
