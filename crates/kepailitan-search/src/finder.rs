//! Match finder: linear scan of searchable nodes in document order.

use crate::content::ContentRoot;
use crate::pattern::QueryPattern;
use crate::session::Match;

/// Every searchable node whose rendered text contains the query, in
/// document order. Read-only.
pub fn find_matches<C: ContentRoot + ?Sized>(root: &C, pattern: &QueryPattern) -> Vec<Match> {
    root.searchable_nodes()
        .into_iter()
        .filter_map(|node| {
            let text = root.text_content(node)?;
            let occurrences = pattern.find_ranges(&text);
            (!occurrences.is_empty()).then_some((node, occurrences))
        })
        .enumerate()
        .map(|(ordinal, (node, occurrences))| Match {
            node,
            ordinal,
            occurrences,
        })
        .collect()
}
