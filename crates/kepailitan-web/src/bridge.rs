//! Search bridge: routes IPC messages from the page's search controls to a
//! [`SearchEngine`] and answers with UI updates.

use std::time::Instant;

use kepailitan_config::schema::{BindingsConfig, SearchConfig};
use kepailitan_search::{ContentRoot, Reveal, SearchEngine, SectionHits, Viewport};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ipc::{js_dispatch_message, IpcMessage, IpcPayload};

/// IPC kind of the update dispatched back to the page.
pub const UPDATE_KIND: &str = "search_update";

/// Everything the page needs to redraw its search controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiUpdate {
    /// Input the triggering message came from, if any.
    pub input: Option<String>,
    /// Query to mirror into the other bound inputs.
    pub query: String,
    pub status: String,
    pub status_kind: &'static str,
    /// "k dari n", absent without results.
    pub position: Option<String>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub summary: Vec<SectionHits>,
}

impl UiUpdate {
    /// JS snippet delivering this update to the page.
    pub fn to_script(&self) -> String {
        let payload = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        js_dispatch_message(UPDATE_KIND, &payload)
    }
}

/// Binds the configured search inputs and controls to one engine.
///
/// Desktop and mobile inputs share the session: a search from either one
/// replaces the highlights of the other.
pub struct SearchBridge {
    engine: SearchEngine,
    bindings: BindingsConfig,
}

impl SearchBridge {
    pub fn new(search: SearchConfig, bindings: BindingsConfig) -> Self {
        Self {
            engine: SearchEngine::new(search),
            bindings,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn bindings(&self) -> &BindingsConfig {
        &self.bindings
    }

    /// Script exposing the bindings to the page before the IPC init script
    /// wires the inputs.
    pub fn bindings_script(&self) -> String {
        let bindings = serde_json::to_string(&self.bindings).unwrap_or_else(|_| "null".into());
        format!("window.kepailitan = window.kepailitan || {{}}; window.kepailitan.bindings = {bindings};")
    }

    /// Handle one IPC message. Returns `None` for messages that change
    /// nothing on screen.
    pub fn handle<D>(&mut self, msg: &IpcMessage, doc: &mut D) -> Option<UiUpdate>
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        match msg.kind.as_str() {
            "search" => {
                let (input, query) = self.input_and_query(&msg.payload)?;
                self.engine.search(&query, doc);
                Some(self.update(input, &*doc))
            }
            "search_input" => {
                // Typing only matters once the input is emptied.
                let (input, query) = self.input_and_query(&msg.payload)?;
                if !query.trim().is_empty() {
                    return None;
                }
                self.engine.reset(doc);
                Some(self.update(input, &*doc))
            }
            "search_next" => {
                self.engine.next(doc);
                Some(self.update(None, &*doc))
            }
            "search_prev" => {
                self.engine.previous(doc);
                Some(self.update(None, &*doc))
            }
            "search_clear" => {
                self.engine.reset(doc);
                Some(self.update(None, &*doc))
            }
            other => {
                debug!(kind = other, "ignoring IPC message");
                None
            }
        }
    }

    /// Handle a raw JSON message as posted by the page.
    pub fn handle_raw<D>(&mut self, raw: &str, doc: &mut D) -> Option<UiUpdate>
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        let Some(msg) = IpcMessage::from_json(raw) else {
            warn!("malformed IPC message: {raw}");
            return None;
        };
        self.handle(&msg, doc)
    }

    /// When the pending scroll comes due, if one is pending.
    pub fn scroll_due(&self) -> Option<tokio::time::Instant> {
        self.engine
            .pending_scroll()
            .map(|p| tokio::time::Instant::from_std(p.due))
    }

    /// Run the pending scroll if it is already due, without waiting.
    ///
    /// Returns `false` when nothing was due or the scroll went stale.
    pub fn poll<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> bool {
        self.engine.run_deferred(Instant::now(), viewport)
    }

    fn input_and_query(&self, payload: &IpcPayload) -> Option<(Option<String>, String)> {
        match payload {
            IpcPayload::Text(query) => Some((None, query.clone())),
            IpcPayload::Json(_) => {
                let query = payload.str_field("query").unwrap_or_default().to_string();
                let input = match (payload.str_field("input"), payload.str_field("button")) {
                    (Some(id), _) => Some(id),
                    (None, Some(button)) => match self.bindings.input_for_button(button) {
                        Some(id) => Some(id),
                        None => {
                            debug!(button, "message from unbound button");
                            return None;
                        }
                    },
                    (None, None) => None,
                };
                match input {
                    Some(id) if self.bindings.inputs.iter().any(|i| i == id) => {
                        Some((Some(id.to_string()), query))
                    }
                    Some(id) => {
                        debug!(input = id, "message from unbound input");
                        None
                    }
                    None => Some((None, query)),
                }
            }
            IpcPayload::None => None,
        }
    }

    fn update<D>(&self, input: Option<String>, doc: &D) -> UiUpdate
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        let status = self.engine.status();
        UiUpdate {
            input,
            query: self.engine.session().query().to_string(),
            status: status.to_string(),
            status_kind: status.kind(),
            position: self.engine.position().map(|p| p.to_string()),
            prev_enabled: self.engine.can_go_previous(),
            next_enabled: self.engine.can_go_next(),
            summary: self.engine.summary(doc),
        }
    }
}
