//! Live Collection Stream
//!
//! Keeps an `EventSource` open on the collection, folds `put`/`patch`
//! events into a `SnapshotTree` and hands every resulting snapshot to the
//! subscriber. When the stream ends (server `cancel`/`auth_revoked`, or the
//! browser giving up) it is reopened after a backoff delay.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use task_store::{
    ReconnectSchedule, Snapshot, SnapshotCallback, SnapshotTree, StoreError, StoreResult,
    StreamEvent, Subscription,
};
use tracing::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{EventSource, MessageEvent};

type Listener = Rc<dyn Fn(Option<&Snapshot>)>;

struct StreamState {
    url: String,
    tree: SnapshotTree,
    reconnect: ReconnectSchedule,
    on_snapshot: Listener,
    source: Option<EventSource>,
    // Closures registered on `source`; they must outlive it
    handlers: Vec<Closure<dyn FnMut(MessageEvent)>>,
    on_open: Option<Closure<dyn FnMut(web_sys::Event)>>,
    on_error: Option<Closure<dyn FnMut(web_sys::Event)>>,
    closed: bool,
}

impl StreamState {
    fn release_source(&mut self) {
        if let Some(source) = self.source.take() {
            source.set_onopen(None);
            source.set_onerror(None);
            source.close();
        }
        self.handlers.clear();
        self.on_open = None;
        self.on_error = None;
    }

    /// Stop the source without dropping its handlers (one may be running)
    fn halt_source(&self) {
        if let Some(source) = &self.source {
            source.close();
        }
    }

    fn shutdown(&mut self) {
        self.closed = true;
        self.release_source();
        info!("task stream closed");
    }
}

/// Open the stream; the returned subscription owns it
pub(crate) fn open(url: String, on_snapshot: SnapshotCallback) -> StoreResult<Subscription> {
    let state = Rc::new(RefCell::new(StreamState {
        url,
        tree: SnapshotTree::new(),
        reconnect: ReconnectSchedule::default(),
        on_snapshot: Rc::from(on_snapshot),
        source: None,
        handlers: Vec::new(),
        on_open: None,
        on_error: None,
        closed: false,
    }));
    connect(&state)?;

    Ok(Subscription::new(move || {
        state.borrow_mut().shutdown();
    }))
}

fn connect(state: &Rc<RefCell<StreamState>>) -> StoreResult<()> {
    let url = state.borrow().url.clone();
    let source = EventSource::new(&url).map_err(js_error)?;

    let mut handlers = Vec::with_capacity(StreamEvent::NAMES.len());
    for name in StreamEvent::NAMES {
        let weak = Rc::downgrade(state);
        let handler = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
            if let Some(state) = weak.upgrade() {
                handle_message(&state, name, &ev);
            }
        });
        if let Err(e) =
            source.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
        {
            source.close();
            return Err(js_error(e));
        }
        handlers.push(handler);
    }

    let weak = Rc::downgrade(state);
    let on_open = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        if let Some(state) = weak.upgrade() {
            state.borrow_mut().reconnect.connected();
            info!("task stream open");
        }
    });
    source.set_onopen(Some(on_open.as_ref().unchecked_ref()));

    let weak = Rc::downgrade(state);
    let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        if let Some(state) = weak.upgrade() {
            handle_error(&state);
        }
    });
    source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let mut inner = state.borrow_mut();
    inner.source = Some(source);
    inner.handlers = handlers;
    inner.on_open = Some(on_open);
    inner.on_error = Some(on_error);
    Ok(())
}

fn handle_message(state: &Rc<RefCell<StreamState>>, name: &str, ev: &MessageEvent) {
    let data = ev.data().as_string().unwrap_or_default();
    let event = match StreamEvent::parse(name, &data) {
        Ok(event) => event,
        Err(e) => {
            warn!(event = name, error = %e, "ignoring malformed stream event");
            return;
        }
    };

    if event.closes_stream() {
        {
            let inner = state.borrow();
            if inner.closed {
                return;
            }
            // Close it ourselves so the browser does not retry on its own timer
            inner.halt_source();
        }
        warn!(event = ?event, "task stream ended by server");
        schedule_reopen(state);
        return;
    }

    let (on_snapshot, snapshot) = {
        let mut inner = state.borrow_mut();
        if inner.closed || !inner.tree.apply(&event) {
            return;
        }
        (Rc::clone(&inner.on_snapshot), inner.tree.snapshot())
    };
    on_snapshot(snapshot.as_ref());
}

fn handle_error(state: &Rc<RefCell<StreamState>>) {
    let gave_up = {
        let inner = state.borrow();
        if inner.closed {
            return;
        }
        inner
            .source
            .as_ref()
            .is_some_and(|source| source.ready_state() == EventSource::CLOSED)
    };
    if gave_up {
        warn!("task stream closed by browser");
        schedule_reopen(state);
    } else {
        warn!("task stream interrupted, browser is reconnecting");
    }
}

/// Reopen after the next backoff delay, unless a reopen is already pending
fn schedule_reopen(state: &Rc<RefCell<StreamState>>) {
    let delay = {
        let mut inner = state.borrow_mut();
        if inner.closed {
            return;
        }
        match inner.reconnect.request() {
            Some(delay) => delay,
            None => return,
        }
    };
    info!(delay_ms = delay.as_millis() as u64, "reopening task stream");

    let weak = Rc::downgrade(state);
    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    spawn_local(async move {
        TimeoutFuture::new(millis).await;
        // The subscription owns the state; a detached stream is gone by now
        if let Some(state) = weak.upgrade() {
            reopen(&state);
        }
    });
}

fn reopen(state: &Rc<RefCell<StreamState>>) {
    {
        let mut inner = state.borrow_mut();
        inner.reconnect.begin_attempt();
        if inner.closed {
            return;
        }
        inner.release_source();
        inner.tree.reset();
    }
    if let Err(e) = connect(state) {
        error!(error = %e, "failed to reopen task stream");
        schedule_reopen(state);
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::Transport(format!("{:?}", err))
}
