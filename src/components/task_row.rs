//! Task Row Component
//!
//! One task with its delete button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use task_store::{delete_task, Task};
use tracing::error;

use crate::context::use_app_context;

/// A single task row.
///
/// Delete only sends the request; the row goes away when the next snapshot
/// arrives without it.
#[component]
pub fn TaskRow(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let Task { id, text } = task;

    let on_delete = move |_: web_sys::MouseEvent| {
        let id = id.clone();
        let delete = delete_task(ctx.store(), id.clone());
        spawn_local(async move {
            if let Err(e) = delete.await {
                error!(task_id = %id, error = %e, "error deleting task");
            }
        });
    };

    view! {
        <li class="task-row">
            <span class="task-text">{text}</span>
            <button class="delete-btn" on:click=on_delete>"✖"</button>
        </li>
    }
}
