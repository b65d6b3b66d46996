//! Task Input Component
//!
//! Text box bound to the draft; Enter submits.

use leptos::html;
use leptos::prelude::*;

use crate::store::{use_view_store, ViewStateStoreFields};

pub const TASK_PLACEHOLDER: &str = "Enter your task...";

#[component]
pub fn TaskInput(
    input_ref: NodeRef<html::Input>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let state = use_view_store();

    view! {
        <input
            node_ref=input_ref
            type="text"
            class="task-input"
            placeholder=TASK_PLACEHOLDER
            prop:value=move || state.draft().with(|draft| draft.text().to_owned())
            on:input=move |ev| state.draft().update(|draft| draft.set(event_target_value(&ev)))
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Enter" {
                    on_submit.run(());
                }
            }
        />
    }
}
