//! Domain Layer
//!
//! Task entity, draft state and error types.
//! This layer has NO platform dependencies.

mod draft;
mod error;
mod lifecycle;
mod task;

pub use draft::Draft;
pub use error::{StoreError, StoreResult, ValidationError};
pub use lifecycle::Lifecycle;
pub use task::{task_path, Task, TaskId, TaskRecord, TASKS_PATH};
