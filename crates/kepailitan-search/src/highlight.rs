//! Highlight renderer: wraps occurrences in markers and restores originals.

use kepailitan_common::NodeId;
use kepailitan_config::SearchConfig;
use tracing::debug;

use crate::content::ContentRoot;
use crate::markup::wrap_occurrences;
use crate::pattern::QueryPattern;
use crate::session::{Match, SearchSession};

/// Applies and removes highlight markers on behalf of a [`SearchSession`].
///
/// Highlighted markup is always derived from the captured original, so
/// applying the same query twice never nests markers.
#[derive(Debug, Clone)]
pub struct HighlightRenderer {
    open: String,
    close: String,
    active_class: String,
}

impl HighlightRenderer {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            open: config.marker_open(),
            close: config.marker_close(),
            active_class: config.active_class.clone(),
        }
    }

    pub fn marker_open(&self) -> &str {
        &self.open
    }

    pub fn marker_close(&self) -> &str {
        &self.close
    }

    /// Highlight every match and return the ones actually highlighted,
    /// renumbered in document order.
    ///
    /// A node whose markup yields no wrapped occurrence is left untouched
    /// and dropped, so every returned match carries a visible marker.
    pub fn apply<C: ContentRoot + ?Sized>(
        &self,
        session: &mut SearchSession,
        root: &mut C,
        pattern: &QueryPattern,
        matches: Vec<Match>,
    ) -> Vec<Match> {
        let mut kept = Vec::with_capacity(matches.len());
        for mut m in matches {
            let original = match session.originals.get(&m.node) {
                Some(captured) => captured.clone(),
                None => match root.markup(m.node) {
                    Some(markup) => markup,
                    None => {
                        debug!(node = %m.node, "matched node vanished before highlighting");
                        continue;
                    }
                },
            };

            let highlighted = wrap_occurrences(&original, pattern, &self.open, &self.close);
            if highlighted.wrapped == 0 {
                debug!(node = %m.node, "no occurrence in markup, dropping match");
                continue;
            }

            if let Err(e) = root.replace_markup(m.node, highlighted.markup) {
                debug!(node = %m.node, "failed to highlight: {e}");
                continue;
            }
            session.originals.entry(m.node).or_insert(original);

            m.ordinal = kept.len();
            kept.push(m);
        }
        kept
    }

    /// Restore every captured node to its original markup and drop the
    /// active distinction. No-op when nothing is highlighted.
    pub fn clear<C: ContentRoot + ?Sized>(&self, session: &mut SearchSession, root: &mut C) {
        self.set_active(session, root, None);
        let restored = session.originals.len();
        for (node, original) in session.originals.drain() {
            if let Err(e) = root.replace_markup(node, original) {
                debug!(%node, "failed to restore markup: {e}");
            }
        }
        if restored > 0 {
            debug!(restored, "cleared highlights");
        }
    }

    /// Move the active distinction to `node`, or just strip it for `None`.
    ///
    /// The previously active node keeps its plain highlight markers.
    pub fn set_active<C: ContentRoot + ?Sized>(
        &self,
        session: &mut SearchSession,
        root: &mut C,
        node: Option<NodeId>,
    ) {
        if let Some(previous) = session.active.take() {
            if let Err(e) = root.set_class(previous, &self.active_class, false) {
                debug!(node = %previous, "failed to deactivate: {e}");
            }
        }
        if let Some(node) = node {
            match root.set_class(node, &self.active_class, true) {
                Ok(()) => session.active = Some(node),
                Err(e) => debug!(%node, "failed to activate: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::find_matches;
    use crate::markup::strip_markers;
    use crate::page::Page;

    fn setup() -> (Page, HighlightRenderer, SearchSession) {
        let mut page = Page::new();
        page.add_block(None, "p", "Kreditor <strong>separatis</strong> adalah...");
        page.add_block(None, "p", "Debitor pailit wajib...");
        page.add_block(None, "p", "Kreditor lain dapat...");
        let renderer = HighlightRenderer::new(&SearchConfig::default());
        (page, renderer, SearchSession::new())
    }

    fn highlight(
        page: &mut Page,
        renderer: &HighlightRenderer,
        session: &mut SearchSession,
        query: &str,
    ) -> Vec<Match> {
        let pattern = QueryPattern::new(query).unwrap();
        let found = find_matches(page, &pattern);
        renderer.apply(session, page, &pattern, found)
    }

    #[test]
    fn apply_wraps_matches_and_captures_originals() {
        let (mut page, renderer, mut session) = setup();
        let kept = highlight(&mut page, &renderer, &mut session, "kreditor");

        assert_eq!(kept.len(), 2);
        assert_eq!(session.captured_count(), 2);
        assert_eq!(
            page.markup_of(NodeId(0)),
            Some("<mark class=\"search-highlight\">Kreditor</mark> <strong>separatis</strong> adalah...")
        );
        assert_eq!(page.markup_of(NodeId(1)), Some("Debitor pailit wajib..."));
        assert_eq!(
            session.original_markup(NodeId(0)),
            Some("Kreditor <strong>separatis</strong> adalah...")
        );
    }

    #[test]
    fn reapplying_never_nests_markers() {
        let (mut page, renderer, mut session) = setup();
        highlight(&mut page, &renderer, &mut session, "kreditor");
        let once = page.markup_of(NodeId(0)).map(str::to_string);

        highlight(&mut page, &renderer, &mut session, "kreditor");

        assert_eq!(page.markup_of(NodeId(0)).map(str::to_string), once);
        assert_eq!(session.original_markup(NodeId(0)).map(|s| s.contains("<mark")), Some(false));
    }

    #[test]
    fn clear_restores_exact_markup() {
        let (mut page, renderer, mut session) = setup();
        let before: Vec<String> = (0..3)
            .map(|i| page.markup_of(NodeId(i)).unwrap_or_default().to_string())
            .collect();

        let kept = highlight(&mut page, &renderer, &mut session, "kreditor");
        for m in &kept {
            let current = page.markup_of(m.node).unwrap_or_default();
            assert_eq!(
                strip_markers(current, renderer.marker_open(), renderer.marker_close()),
                before[m.node.index()]
            );
        }

        renderer.clear(&mut session, &mut page);

        for (i, original) in before.iter().enumerate() {
            assert_eq!(page.markup_of(NodeId(i as u32)), Some(original.as_str()));
        }
        assert_eq!(session.captured_count(), 0);
    }

    #[test]
    fn clear_without_highlights_is_noop() {
        let (mut page, renderer, mut session) = setup();
        renderer.clear(&mut session, &mut page);
        assert_eq!(page.markup_of(NodeId(0)), Some("Kreditor <strong>separatis</strong> adalah..."));
    }

    #[test]
    fn set_active_moves_single_distinction() {
        let (mut page, renderer, mut session) = setup();
        highlight(&mut page, &renderer, &mut session, "kreditor");
        let class = &SearchConfig::default().active_class;

        renderer.set_active(&mut session, &mut page, Some(NodeId(0)));
        assert!(page.has_class(NodeId(0), class));

        renderer.set_active(&mut session, &mut page, Some(NodeId(2)));
        assert!(!page.has_class(NodeId(0), class));
        assert!(page.has_class(NodeId(2), class));
        assert_eq!(page.nodes_with_class(class), vec![NodeId(2)]);
        // Plain highlight survives deactivation.
        assert!(page.markup_of(NodeId(0)).unwrap_or_default().contains("<mark"));

        renderer.set_active(&mut session, &mut page, None);
        assert!(page.nodes_with_class(class).is_empty());
        assert!(session.active().is_none());
    }

    #[test]
    fn clear_strips_active_distinction() {
        let (mut page, renderer, mut session) = setup();
        highlight(&mut page, &renderer, &mut session, "kreditor");
        renderer.set_active(&mut session, &mut page, Some(NodeId(2)));

        renderer.clear(&mut session, &mut page);

        assert!(page
            .nodes_with_class(&SearchConfig::default().active_class)
            .is_empty());
    }

    #[test]
    fn unknown_node_is_dropped() {
        let (mut page, renderer, mut session) = setup();
        let pattern = QueryPattern::new("kreditor").unwrap();
        let ghost = Match {
            node: NodeId(99),
            ordinal: 0,
            occurrences: vec![0..8],
        };

        let kept = renderer.apply(&mut session, &mut page, &pattern, vec![ghost]);

        assert!(kept.is_empty());
        assert_eq!(session.captured_count(), 0);
    }
}
