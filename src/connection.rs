//! Connection Status Indicator
//!
//! Mirrors `navigator.onLine` into a `data-connection-status` attribute on
//! `<body>` whenever the browser reports going online or offline. Display
//! only; it never gates or queues operations.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

fn apply_status() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let status = if window.navigator().on_line() {
        "online"
    } else {
        "offline"
    };
    if let Some(body) = window.document().and_then(|doc| doc.body()) {
        let _ = body.set_attribute("data-connection-status", status);
    }
}

/// Set the current status and keep it updated on online/offline events.
pub fn bind_connection_status() {
    apply_status();

    let on_change = Closure::<dyn FnMut()>::new(apply_status);
    if let Some(window) = web_sys::window() {
        let _ = window
            .add_event_listener_with_callback("online", on_change.as_ref().unchecked_ref());
        let _ = window
            .add_event_listener_with_callback("offline", on_change.as_ref().unchecked_ref());
    }
    on_change.forget();
}
