//! Task List Frontend App
//!
//! Root component: picks the task store and provides shared state.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::TaskListView;
use crate::config;
use crate::context::AppContext;
use crate::store::ViewState;

#[component]
pub fn App() -> impl IntoView {
    // Provide context to all children
    provide_context(AppContext::new(config::connect_store()));
    provide_context(Store::new(ViewState::default()));

    view! {
        <div class="app-layout">
            <div class="card">
                <h1>"Task Manager"</h1>
                <TaskListView />
            </div>
        </div>
    }
}
