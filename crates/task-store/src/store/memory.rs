//! In-Memory Task Store
//!
//! Same contract as the hosted store, kept in process. Clones share one
//! collection, so two clones behave like two clients of one database.

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

use super::traits::{SnapshotCallback, Subscription, TaskStore};
use crate::domain::{StoreResult, TaskId, TaskRecord};
use crate::push_id::PushIdGenerator;
use crate::snapshot::Snapshot;

type Listener = Rc<dyn Fn(Option<&Snapshot>)>;

struct Inner {
    records: Map<String, Value>,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
    ids: PushIdGenerator,
    rng: SmallRng,
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let seed = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        Self::with_seed(seed)
    }

    /// Deterministic key randomness, for tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                records: Map::new(),
                listeners: Vec::new(),
                next_listener: 0,
                ids: PushIdGenerator::new(),
                rng: SmallRng::seed_from_u64(seed),
            })),
        }
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        Snapshot::from_map(self.inner.borrow().records.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().records.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Push the current snapshot to every listener.
    ///
    /// Listeners run after the borrow is released so they may call back
    /// into the store.
    fn notify(&self) {
        let (listeners, snapshot) = {
            let inner = self.inner.borrow();
            let listeners: Vec<Listener> = inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            (listeners, Snapshot::from_map(inner.records.clone()))
        };
        for listener in listeners {
            listener(snapshot.as_ref());
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TaskStore for MemoryStore {
    async fn create(&self, text: &str) -> StoreResult<TaskId> {
        let record = serde_json::to_value(TaskRecord::new(text))?;
        let id = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let id = inner.ids.next_id(now_millis(), &mut inner.rng);
            inner.records.insert(id.to_string(), record);
            id
        };
        debug!(task_id = %id, "memory store: created task");
        self.notify();
        Ok(id)
    }

    fn subscribe(&self, on_snapshot: SnapshotCallback) -> StoreResult<Subscription> {
        let listener: Listener = Rc::from(on_snapshot);
        let (key, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.next_listener;
            inner.next_listener += 1;
            inner.listeners.push((key, Rc::clone(&listener)));
            (key, Snapshot::from_map(inner.records.clone()))
        };
        listener(snapshot.as_ref());

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(k, _)| *k != key);
            }
        }))
    }

    async fn remove(&self, id: &TaskId) -> StoreResult<()> {
        let removed = self.inner.borrow_mut().records.remove(id.as_str()).is_some();
        if removed {
            debug!(task_id = %id, "memory store: removed task");
            self.notify();
        }
        Ok(())
    }
}

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
