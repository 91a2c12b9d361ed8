//! Search engine: query submission, highlight lifecycle and match navigation.

use std::time::Instant;

use kepailitan_config::SearchConfig;
use tracing::{debug, info, warn};

use crate::content::{ContentRoot, Reveal, Viewport};
use crate::cursor::{self, PendingScroll};
use crate::finder;
use crate::highlight::HighlightRenderer;
use crate::pattern::QueryPattern;
use crate::session::SearchSession;
use crate::status::{Position, SearchStatus};
use crate::summary::{self, SectionHits};

/// Owns one search session and drives it against a document.
pub struct SearchEngine {
    config: SearchConfig,
    renderer: HighlightRenderer,
    session: SearchSession,
    status: SearchStatus,
    pending: Option<PendingScroll>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        SearchEngine {
            renderer: HighlightRenderer::new(&config),
            config,
            session: SearchSession::new(),
            status: SearchStatus::Idle,
            pending: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn renderer(&self) -> &HighlightRenderer {
        &self.renderer
    }

    /// Submit a query.
    ///
    /// Previous highlights are restored before anything else, and any
    /// pending scroll from the previous session is dropped. An empty query
    /// resets the session; a query below the minimum length yields
    /// [`SearchStatus::TooShort`]. On results the first match becomes
    /// current.
    pub fn search<D>(&mut self, query: &str, doc: &mut D) -> &SearchStatus
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        self.renderer.clear(&mut self.session, doc);
        self.pending = None;

        let query = query.trim();
        self.session.begin(query);

        if query.is_empty() {
            self.status = SearchStatus::Idle;
            return &self.status;
        }

        let min_chars = self.config.min_query_chars;
        if query.chars().count() < min_chars as usize {
            debug!(query, min_chars, "query too short");
            self.status = SearchStatus::TooShort { min_chars };
            return &self.status;
        }

        let pattern = match QueryPattern::new(query) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!(query, "could not build highlight pattern: {e}");
                self.status = SearchStatus::NoResults {
                    query: query.to_string(),
                };
                return &self.status;
            }
        };

        let found = finder::find_matches(&*doc, &pattern);
        let matches = self.renderer.apply(&mut self.session, doc, &pattern, found);
        self.session.matches = matches;

        let count = self.session.matches.len();
        info!(query, count, "search finished");

        if count == 0 {
            self.status = SearchStatus::NoResults {
                query: query.to_string(),
            };
        } else {
            self.status = SearchStatus::Found {
                query: query.to_string(),
                count,
            };
            self.go_to(0, doc);
        }
        &self.status
    }

    /// Clear highlights and start an empty session.
    pub fn reset<D: ContentRoot + ?Sized>(&mut self, doc: &mut D) {
        self.renderer.clear(&mut self.session, doc);
        self.pending = None;
        self.session.begin("");
        self.status = SearchStatus::Idle;
    }

    /// Make match `index` current: reveal its containers, move the active
    /// distinction and schedule the scroll. Out of range is a no-op.
    pub fn go_to<D>(&mut self, index: usize, doc: &mut D) -> bool
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        let Some(node) = self.session.matches.get(index).map(|m| m.node) else {
            debug!(index, total = self.session.matches.len(), "match index out of range");
            return false;
        };

        self.renderer.set_active(&mut self.session, doc, None);
        let revealed = cursor::reveal_ancestors(doc, node);
        self.renderer.set_active(&mut self.session, doc, Some(node));
        self.session.cursor = Some(index);

        self.pending = Some(PendingScroll {
            generation: self.session.generation,
            node,
            due: Instant::now() + self.config.reveal_delay(),
        });
        debug!(index, %node, revealed, "moved to match");
        true
    }

    /// Advance to the next match. No-op on the last one.
    pub fn next<D>(&mut self, doc: &mut D) -> bool
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        match self.session.cursor {
            Some(i) if i + 1 < self.session.matches.len() => self.go_to(i + 1, doc),
            _ => false,
        }
    }

    /// Go back to the previous match. No-op on the first one.
    pub fn previous<D>(&mut self, doc: &mut D) -> bool
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        match self.session.cursor {
            Some(i) if i > 0 => self.go_to(i - 1, doc),
            _ => false,
        }
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.session.cursor, Some(i) if i + 1 < self.session.matches.len())
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.session.cursor, Some(i) if i > 0)
    }

    /// 1-based position of the current match.
    pub fn position(&self) -> Option<Position> {
        self.session.cursor.map(|i| Position {
            current: i + 1,
            total: self.session.matches.len(),
        })
    }

    pub fn pending_scroll(&self) -> Option<&PendingScroll> {
        self.pending.as_ref()
    }

    /// Run the scheduled scroll and focus if it is due at `now`.
    ///
    /// A scroll left over from a superseded session, or whose node is no
    /// longer active, is discarded. Returns `true` when the viewport moved.
    pub fn run_deferred<V: Viewport + ?Sized>(&mut self, now: Instant, viewport: &mut V) -> bool {
        if !self.pending.as_ref().is_some_and(|p| p.is_due(now)) {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        if pending.generation != self.session.generation
            || self.session.active != Some(pending.node)
        {
            debug!(node = %pending.node, "discarding stale scroll");
            return false;
        }

        let Some(top) = viewport.document_top(pending.node) else {
            debug!(node = %pending.node, "match not laid out, skipping scroll");
            return false;
        };
        let header = viewport
            .header_height()
            .unwrap_or(self.config.header_fallback_height);
        viewport.scroll_to(cursor::scroll_target(top, header, self.config.scroll_margin));
        viewport.focus(pending.node);
        true
    }

    /// Current matches grouped by section.
    pub fn summary<D>(&self, doc: &D) -> Vec<SectionHits>
    where
        D: ContentRoot + Reveal + ?Sized,
    {
        summary::summarize(&self.session, doc, &self.config)
    }
}
