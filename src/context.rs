//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use task_store::TaskStore;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The task store for this session (single-threaded, so stored locally)
    store: StoredValue<Rc<dyn TaskStore>, LocalStorage>,
}

impl AppContext {
    pub fn new(store: Rc<dyn TaskStore>) -> Self {
        Self {
            store: StoredValue::new_local(store),
        }
    }

    pub fn store(&self) -> Rc<dyn TaskStore> {
        self.store.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
