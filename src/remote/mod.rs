//! Realtime Database Adapter
//!
//! `TaskStore` backed by the hosted realtime database: REST writes through
//! `gloo-net`, live reads through the browser's `EventSource`.

mod stream;

use std::cell::RefCell;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use task_store::{
    PushIdGenerator, RestEndpoint, SnapshotCallback, StoreError, StoreResult, Subscription,
    TaskId, TaskRecord, TaskStore,
};
use tracing::debug;

pub struct FirebaseStore {
    endpoint: RestEndpoint,
    keys: RefCell<(PushIdGenerator, SmallRng)>,
}

impl FirebaseStore {
    pub fn new(endpoint: RestEndpoint) -> Self {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ (js_sys::Date::now() as u64);
        Self {
            endpoint,
            keys: RefCell::new((PushIdGenerator::new(), SmallRng::seed_from_u64(seed))),
        }
    }

    /// New push key, generated client side like the database SDKs do
    fn next_key(&self) -> TaskId {
        let mut keys = self.keys.borrow_mut();
        let (ids, rng) = &mut *keys;
        ids.next_id(js_sys::Date::now() as u64, rng)
    }
}

#[async_trait(?Send)]
impl TaskStore for FirebaseStore {
    async fn create(&self, text: &str) -> StoreResult<TaskId> {
        let id = self.next_key();
        let response = Request::put(&self.endpoint.record_url(&id))
            .json(&TaskRecord::new(text))
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        ensure_ok(response).await?;
        debug!(task_id = %id, "created task");
        Ok(id)
    }

    fn subscribe(&self, on_snapshot: SnapshotCallback) -> StoreResult<Subscription> {
        stream::open(self.endpoint.collection_url(), on_snapshot)
    }

    async fn remove(&self, id: &TaskId) -> StoreResult<()> {
        let response = Request::delete(&self.endpoint.record_url(id))
            .send()
            .await
            .map_err(transport)?;
        ensure_ok(response).await
    }
}

async fn ensure_ok(response: Response) -> StoreResult<()> {
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

fn transport(err: gloo_net::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}
