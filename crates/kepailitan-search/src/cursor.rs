//! Navigation helpers: revealing collapsed ancestors and deferred scrolling.

use std::time::Instant;

use kepailitan_common::NodeId;
use tracing::debug;

use crate::content::Reveal;

/// Scroll and focus scheduled after a navigation.
///
/// The scroll target is measured only when this runs, after any reveal has
/// had time to change the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingScroll {
    /// Session generation the scroll belongs to.
    pub generation: u64,
    pub node: NodeId,
    pub due: Instant,
}

impl PendingScroll {
    pub fn is_due(&self, now: Instant) -> bool {
        self.due <= now
    }
}

/// Reveal every hidden ancestor container of `node`, outermost first.
/// Returns how many containers were revealed.
pub(crate) fn reveal_ancestors<D: Reveal + ?Sized>(doc: &mut D, node: NodeId) -> usize {
    let mut revealed = 0;
    for container in doc.ancestors(node) {
        if doc.is_visible(&container) {
            continue;
        }
        match doc.reveal(&container) {
            Ok(()) => revealed += 1,
            Err(e) => debug!(%node, container = %container.id, "reveal failed: {e}"),
        }
    }
    revealed
}

/// Scroll top placing an element just below the fixed header.
pub(crate) fn scroll_target(node_top: f64, header_height: f64, margin: f64) -> f64 {
    (node_top - header_height - margin).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContainerKind, ContainerRef};
    use crate::page::Page;
    use std::time::Duration;

    #[test]
    fn scroll_target_subtracts_header_and_margin() {
        assert_eq!(scroll_target(500.0, 70.0, 20.0), 410.0);
    }

    #[test]
    fn scroll_target_clamps_at_top() {
        assert_eq!(scroll_target(40.0, 70.0, 20.0), 0.0);
    }

    #[test]
    fn pending_scroll_due() {
        let now = Instant::now();
        let pending = PendingScroll {
            generation: 1,
            node: NodeId(0),
            due: now + Duration::from_millis(300),
        };
        assert!(!pending.is_due(now));
        assert!(pending.is_due(now + Duration::from_millis(300)));
    }

    #[test]
    fn reveals_hidden_ancestors_outermost_first() {
        let mut page = Page::new();
        let beranda = page.add_section("beranda", "Beranda").unwrap();
        page.add_block(Some(beranda), "p", "Selamat datang");
        let proses = page.add_section("proses", "Proses Kepailitan").unwrap();
        let sub = page.add_sub_section(proses, "permohonan", "Permohonan").unwrap();
        let acc = page.add_accordion(sub, "syarat", "Syarat").unwrap();
        let node = page.add_block(Some(acc), "li", "Dua kreditor atau lebih");
        page.open("beranda").unwrap();

        let revealed = reveal_ancestors(&mut page, node);

        assert_eq!(revealed, 3);
        assert!(page.is_open("proses"));
        assert!(page.is_open("permohonan"));
        assert!(page.is_open("syarat"));
        assert!(!page.is_open("beranda"));
    }

    #[test]
    fn visible_ancestors_are_left_alone() {
        let mut page = Page::new();
        let section = page.add_section("kurator", "Kurator").unwrap();
        let node = page.add_block(Some(section), "p", "Tugas kurator");
        page.open("kurator").unwrap();

        assert_eq!(reveal_ancestors(&mut page, node), 0);
        assert!(page.is_visible(&ContainerRef::new(ContainerKind::Section, "kurator")));
    }
}
