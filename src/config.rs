//! Remote Store Configuration
//!
//! Connection credentials come from `window.TASK_LIST_CONFIG`, set by the
//! hosting page, or from `TASK_LIST_DATABASE_URL` / `TASK_LIST_DATABASE_AUTH`
//! at build time. Without either, tasks live in memory for the session.

use std::rc::Rc;

use task_store::{MemoryStore, RemoteConfig, TaskStore};
use tracing::{error, info, warn};
use wasm_bindgen::JsValue;

use crate::remote::FirebaseStore;

const CONFIG_GLOBAL: &str = "TASK_LIST_CONFIG";

pub fn load_remote_config() -> Option<RemoteConfig> {
    from_window().or_else(from_build_env)
}

fn from_window() -> Option<RemoteConfig> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value::<RemoteConfig>(value) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "ignoring malformed {}", CONFIG_GLOBAL);
            None
        }
    }
}

fn from_build_env() -> Option<RemoteConfig> {
    option_env!("TASK_LIST_DATABASE_URL").map(|url| RemoteConfig {
        database_url: url.to_owned(),
        auth: option_env!("TASK_LIST_DATABASE_AUTH").map(str::to_owned),
    })
}

/// Pick the store for this session
pub fn connect_store() -> Rc<dyn TaskStore> {
    let Some(config) = load_remote_config() else {
        warn!("no database configured, tasks are kept in memory");
        return Rc::new(MemoryStore::new());
    };
    match config.endpoint() {
        Ok(endpoint) => {
            info!(url = endpoint.base_url(), "using realtime database");
            Rc::new(FirebaseStore::new(endpoint))
        }
        Err(e) => {
            error!(error = %e, "invalid database config, tasks are kept in memory");
            Rc::new(MemoryStore::new())
        }
    }
}
