//! Task List Session
//!
//! Binds one store subscription to the lifetime of a mounted list view.
//! Every snapshot is projected and handed to the view; teardown detaches the
//! subscription so later changes no longer reach it.

use std::future::Future;
use std::rc::Rc;

use tracing::info;

use crate::domain::{Draft, Lifecycle, StoreResult, Task, TaskId, ValidationError};
use crate::snapshot::project;
use crate::store::{Subscription, TaskStore};

#[derive(Debug)]
pub struct TaskListSession {
    subscription: Option<Subscription>,
}

impl TaskListSession {
    /// Subscribe and start forwarding projected lists to `on_tasks`
    pub fn mount<S, F>(store: &S, on_tasks: F) -> StoreResult<Self>
    where
        S: TaskStore + ?Sized,
        F: Fn(Option<Vec<Task>>) + 'static,
    {
        let subscription =
            store.subscribe(Box::new(move |snapshot| on_tasks(project(snapshot))))?;
        info!(state = Lifecycle::Subscribed.as_str(), "task list mounted");
        Ok(Self {
            subscription: Some(subscription),
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.subscription.is_some() {
            Lifecycle::Subscribed
        } else {
            Lifecycle::Unsubscribed
        }
    }

    /// Detach from the store; later calls are no-ops
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            info!(state = Lifecycle::Unsubscribed.as_str(), "task list unmounted");
        }
    }
}

impl Drop for TaskListSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Validate and take the draft, then write it as a new task.
///
/// The draft is cleared before the write starts; a blank draft is rejected,
/// left as typed, and nothing is written. The returned future performs the
/// single `create` call.
pub fn submit_draft<S>(
    draft: &mut Draft,
    store: Rc<S>,
) -> Result<impl Future<Output = StoreResult<TaskId>>, ValidationError>
where
    S: TaskStore + ?Sized + 'static,
{
    let text = draft.submit()?;
    Ok(async move { store.create(&text).await })
}

/// Request removal of one task.
///
/// Only the store is asked; the displayed list changes when the next
/// snapshot arrives.
pub fn delete_task<S>(store: Rc<S>, id: TaskId) -> impl Future<Output = StoreResult<()>>
where
    S: TaskStore + ?Sized + 'static,
{
    async move {
        store.remove(&id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }
}
