//! Task List View Component
//!
//! Input, add button and the live task list. Mounting subscribes to the
//! store and starts the document-wide keydown focus; unmounting releases both.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_keyfocus::{focus_on_any_keydown, DocumentListener};
use task_store::{submit_draft, TaskListSession};
use tracing::error;

use crate::components::{TaskInput, TaskRow};
use crate::context::use_app_context;
use crate::store::{use_view_store, ViewStateStoreFields};

#[component]
pub fn TaskListView() -> impl IntoView {
    let ctx = use_app_context();
    let state = use_view_store();
    let input_ref = NodeRef::<html::Input>::new();

    // Subscribe: every snapshot replaces the projected list
    let session = match TaskListSession::mount(&*ctx.store(), move |tasks| state.tasks().set(tasks)) {
        Ok(session) => Some(session),
        Err(e) => {
            error!(error = %e, "failed to subscribe to tasks");
            None
        }
    };
    let keydown = match focus_on_any_keydown(input_ref) {
        Ok(listener) => Some(listener),
        Err(e) => {
            error!(error = ?e, "failed to bind keydown focus");
            None
        }
    };

    let mounted = StoredValue::new_local(Mounted { session, keydown });
    on_cleanup(move || {
        let _ = mounted.try_update_value(Mounted::release);
    });

    let submit = move || {
        let mut outcome = None;
        state
            .draft()
            .update(|draft| outcome = Some(submit_draft(draft, ctx.store())));
        match outcome {
            Some(Ok(write)) => {
                // Fire and forget: the draft is already cleared
                spawn_local(async move {
                    if let Err(e) = write.await {
                        error!(error = %e, "failed to create task");
                    }
                });
                if let Some(input) = input_ref.get_untracked() {
                    let _ = input.focus();
                }
            }
            Some(Err(e)) => alert(&e.to_string()),
            None => {}
        }
    };

    view! {
        <div class="task-list-view">
            <div class="task-input-row">
                <TaskInput input_ref=input_ref on_submit=Callback::new(move |()| submit()) />
                <button class="add-btn" on:click=move |_| submit()>"+"</button>
            </div>

            <Show
                when=move || state.tasks().with(Option::is_some)
                fallback=|| view! { <p class="empty-hint">"No tasks available"</p> }
            >
                <ul class="task-list">
                    <For
                        each=move || state.tasks().get().unwrap_or_default()
                        key=|task| task.id.clone()
                        children=|task| view! { <TaskRow task=task /> }
                    />
                </ul>
            </Show>
        </div>
    }
}

/// Resources held while the view is mounted
struct Mounted {
    session: Option<TaskListSession>,
    keydown: Option<DocumentListener>,
}

impl Mounted {
    fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.unmount();
        }
        if let Some(listener) = self.keydown.take() {
            listener.detach();
        }
    }
}

/// Blocking browser alert
fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}
