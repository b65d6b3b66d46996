//! Task Store
//!
//! Platform-independent core of the task list:
//! - domain: Task model, draft input state, errors
//! - snapshot: Collection snapshots and the list projection
//! - store: The live `TaskStore` abstraction and an in-memory implementation
//! - realtime: Realtime database wire model (REST endpoints, event stream)
//! - session: Mounted-view lifecycle tying a store subscription to a list

pub mod domain;
pub mod push_id;
pub mod realtime;
pub mod session;
pub mod snapshot;
pub mod store;

pub use domain::{
    task_path, Draft, Lifecycle, StoreError, StoreResult, Task, TaskId, TaskRecord,
    ValidationError, TASKS_PATH,
};
pub use push_id::PushIdGenerator;
pub use realtime::{
    Backoff, ReconnectSchedule, RemoteConfig, RestEndpoint, SnapshotTree, StreamEvent,
};
pub use session::{delete_task, submit_draft, TaskListSession};
pub use snapshot::{project, Snapshot};
pub use store::{MemoryStore, SnapshotCallback, Subscription, TaskStore};
