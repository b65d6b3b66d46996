//! Leptos Key Focus
//!
//! Document-wide event listeners whose lifetime is a Rust value: attaching
//! returns a `DocumentListener`, and dropping it removes the listener.
//! Built on that, `focus_on_any_keydown` sends every key press in the page
//! to one input.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// A listener registered on `document`.
///
/// The listener is removed exactly once, when this value is dropped.
pub struct DocumentListener {
    document: web_sys::Document,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl DocumentListener {
    /// Register `handler` for `event` on the current document
    pub fn attach<E, F>(event: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or_else(|| JsValue::from_str("document is not available"))?;

        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            handler(ev.unchecked_into::<E>());
        });
        document.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            document,
            event,
            callback,
        })
    }

    /// Remove the listener now
    pub fn detach(self) {}
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Focus `input` on every keydown anywhere in the document.
///
/// Applies to any key and any current focus, including the input itself
/// (a no-op) and other controls on the page.
pub fn focus_on_any_keydown(input: NodeRef<html::Input>) -> Result<DocumentListener, JsValue> {
    DocumentListener::attach("keydown", move |_ev: web_sys::KeyboardEvent| {
        if let Some(el) = input.get_untracked() {
            let _ = el.focus();
        }
    })
}
