//! View State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use task_store::{Draft, Task};

/// State behind the task list view
#[derive(Clone, Debug, Default, Store)]
pub struct ViewState {
    /// Last projected snapshot; `None` means the store has no tasks.
    /// Written only by the store subscription.
    pub tasks: Option<Vec<Task>>,
    /// Text typed into the input, not yet submitted
    pub draft: Draft,
}

/// Type alias for the store
pub type ViewStore = Store<ViewState>;

/// Get the view store from context
pub fn use_view_store() -> ViewStore {
    expect_context::<ViewStore>()
}
