//! Result summary grouped by content section, with highlighted excerpts.

use std::collections::HashMap;

use kepailitan_config::SearchConfig;
use serde::Serialize;

use crate::content::{ContainerKind, ContentRoot, Reveal};
use crate::markup::{escape_html, wrap_occurrences};
use crate::pattern::QueryPattern;
use crate::session::SearchSession;

/// Matches that fall inside one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHits {
    /// `None` for matches outside any section.
    pub section_id: Option<String>,
    pub title: String,
    pub match_count: usize,
    /// First few matched nodes as escaped text with highlight markers.
    pub excerpts: Vec<String>,
}

/// Group the session's matches by enclosing section, in order of first
/// appearance.
pub fn summarize<D>(session: &SearchSession, doc: &D, config: &SearchConfig) -> Vec<SectionHits>
where
    D: ContentRoot + Reveal + ?Sized,
{
    if session.matches().is_empty() {
        return Vec::new();
    }
    let Ok(pattern) = QueryPattern::new(session.query()) else {
        return Vec::new();
    };
    let open = config.marker_open();
    let close = config.marker_close();
    let max_excerpts = config.summary_excerpts as usize;

    let mut groups: Vec<SectionHits> = Vec::new();
    let mut by_section: HashMap<Option<String>, usize> = HashMap::new();

    for m in session.matches() {
        let section_id = doc
            .ancestors(m.node)
            .into_iter()
            .find(|c| c.kind == ContainerKind::Section)
            .map(|c| c.id);

        let slot = *by_section.entry(section_id.clone()).or_insert_with(|| {
            let title = section_id
                .as_deref()
                .map(|id| doc.section_title(id).unwrap_or_else(|| id.to_string()))
                .unwrap_or_default();
            groups.push(SectionHits {
                section_id,
                title,
                match_count: 0,
                excerpts: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.match_count += 1;
        if group.excerpts.len() < max_excerpts {
            if let Some(text) = doc.text_content(m.node) {
                let excerpt = wrap_occurrences(&escape_html(&text), &pattern, &open, &close);
                group.excerpts.push(excerpt.markup);
            }
        }
    }
    groups
}
