//! Search session state: query, ordered matches, cursor and captured markup.

use std::collections::HashMap;
use std::ops::Range;

use kepailitan_common::NodeId;

/// A searchable node with at least one occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub node: NodeId,
    /// Position in the match sequence (document order).
    pub ordinal: usize,
    /// Byte ranges of each occurrence in the node's rendered text.
    pub occurrences: Vec<Range<usize>>,
}

/// Mutable state of one search UI instance.
///
/// `cursor` is `None` or a valid index into `matches`, and the node holding
/// the active distinction is always `matches[cursor]`.
#[derive(Debug, Default)]
pub struct SearchSession {
    pub(crate) query: String,
    pub(crate) matches: Vec<Match>,
    pub(crate) cursor: Option<usize>,
    /// Original inner markup of every node mutated this session.
    pub(crate) originals: HashMap<NodeId, String>,
    pub(crate) active: Option<NodeId>,
    pub(crate) generation: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The match under the cursor, if any.
    pub fn current(&self) -> Option<&Match> {
        self.cursor.and_then(|i| self.matches.get(i))
    }

    /// The node currently carrying the active distinction.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Incremented every time the session starts over. Deferred work
    /// stamped with an older generation is stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn original_markup(&self, node: NodeId) -> Option<&str> {
        self.originals.get(&node).map(String::as_str)
    }

    pub fn captured_count(&self) -> usize {
        self.originals.len()
    }

    /// Start a new session for `query`. Highlights must already be cleared.
    pub(crate) fn begin(&mut self, query: &str) {
        debug_assert!(self.originals.is_empty(), "highlights not cleared");
        debug_assert!(self.active.is_none(), "active node not cleared");
        self.query = query.to_string();
        self.matches.clear();
        self.cursor = None;
        self.generation = self.generation.wrapping_add(1);
    }
}
