//! IPC protocol between the page scripts and Rust.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: page scripts post `{"kind": ..., "payload": ...}` JSON
//!   through `window.kepailitan.ipc.send(kind, payload)`.
//! - **Rust -> JS**: Rust evaluates a generated snippet that calls
//!   `window.kepailitan.ipc._dispatch(kind, payload)`.

use serde::{Deserialize, Serialize};

/// A typed IPC message from JavaScript to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    #[serde(default)]
    pub payload: IpcPayload,
}

/// Payload of an IPC message: a plain string, structured JSON, or nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    #[default]
    None,
}

impl IpcPayload {
    /// Read a string field from a JSON object payload.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self {
            IpcPayload::Json(value) => value.get(name)?.as_str(),
            _ => None,
        }
    }
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Text(text.into()),
        }
    }

    pub fn json(kind: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
        }
    }
}

/// JavaScript snippet that sets up the IPC bridge on the page.
///
/// Besides the raw `send`/`on` pair it binds the search controls listed in
/// `window.kepailitan.bindings`: Enter or a search button submits, clearing
/// an input resets the search and the previous/next buttons navigate.
/// `search_update` messages are drawn into the status line, the position
/// indicator and the navigation buttons.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.kepailitan = window.kepailitan || {};
    window.kepailitan.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload || null
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };

    var ipc = window.kepailitan.ipc;
    function byId(id) { return id ? document.getElementById(id) : null; }

    ipc.on('search_update', function(u) {
        var b = window.kepailitan.bindings;
        if (!b || !u) return;
        var results = byId(b.results);
        if (results) {
            results.textContent = u.status;
            results.setAttribute('data-status', u.status_kind);
        }
        var position = byId(b.position);
        if (position) {
            position.textContent = u.position || '';
            position.hidden = !u.position;
        }
        var prev = byId(b.previous);
        if (prev) prev.disabled = !u.prev_enabled;
        var next = byId(b.next);
        if (next) next.disabled = !u.next_enabled;
        if (u.input) {
            b.inputs.forEach(function(id) {
                var other = byId(id);
                if (other && id !== u.input) other.value = u.query;
            });
        }
    });

    ipc.on('search_scrolled', function(p) {
        if (p) window.scrollTo({ top: p.scroll_top, behavior: 'smooth' });
    });

    document.addEventListener('DOMContentLoaded', function() {
        var b = window.kepailitan.bindings;
        if (!b) return;
        b.inputs.forEach(function(id, i) {
            var input = byId(id);
            if (!input) return;
            input.addEventListener('keypress', function(e) {
                if (e.key === 'Enter') {
                    e.preventDefault();
                    ipc.send('search', { input: id, query: input.value });
                }
            });
            input.addEventListener('input', function() {
                ipc.send('search_input', { input: id, query: input.value });
            });
            var button = byId(b.buttons[i]);
            if (button) {
                button.addEventListener('click', function() {
                    ipc.send('search', { button: b.buttons[i], query: input.value });
                });
            }
        });
        var prev = byId(b.previous);
        if (prev) {
            prev.disabled = true;
            prev.addEventListener('click', function() { ipc.send('search_prev'); });
        }
        var next = byId(b.next);
        if (next) {
            next.disabled = true;
            next.addEventListener('click', function() { ipc.send('search_next'); });
        }
    });
})();
"#;

/// Generate a JS snippet that dispatches a message to the JS IPC handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.kepailitan.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
