//! In-memory content document.
//!
//! A `Page` is a flat list of blocks (paragraphs, list items, headings,
//! table cells) nested inside sections, sub-sections and accordions. It
//! implements every collaborator contract the engine needs, with the
//! site's visibility rules:
//!
//! - one section is shown at a time;
//! - opening a sub-section hides the other sub-sections and collapses all
//!   accordions;
//! - opening an accordion collapses its siblings.
//!
//! Layout is a fixed height per visible block, enough to compute scroll
//! targets.

mod outline;

pub use outline::{OutlineItem, PageOutline, SectionOutline};

use std::collections::{BTreeSet, HashMap};

use kepailitan_common::{ContentError, NodeId};
use kepailitan_config::schema::DEFAULT_SEARCHABLE_TAGS;
use tracing::debug;

use crate::content::{ContainerKind, ContainerRef, ContentRoot, Reveal, Viewport};
use crate::markup;

/// Default height of one rendered block.
pub const DEFAULT_BLOCK_HEIGHT: f64 = 48.0;

/// Handle of a container inside a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerSlot(usize);

#[derive(Debug, Clone)]
struct Container {
    kind: ContainerKind,
    id: String,
    title: String,
    parent: Option<usize>,
    open: bool,
}

#[derive(Debug, Clone)]
struct Block {
    tag: String,
    markup: String,
    classes: BTreeSet<String>,
    parent: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Page {
    containers: Vec<Container>,
    by_id: HashMap<String, usize>,
    blocks: Vec<Block>,
    searchable_tags: Vec<String>,
    header_height: Option<f64>,
    block_height: f64,
    scroll_top: f64,
    focused: Option<NodeId>,
}

impl Page {
    pub fn new() -> Self {
        Self::with_searchable_tags(DEFAULT_SEARCHABLE_TAGS.iter().map(|t| t.to_string()))
    }

    pub fn with_searchable_tags(tags: impl IntoIterator<Item = String>) -> Self {
        Self {
            containers: Vec::new(),
            by_id: HashMap::new(),
            blocks: Vec::new(),
            searchable_tags: tags.into_iter().map(|t| t.to_ascii_lowercase()).collect(),
            header_height: None,
            block_height: DEFAULT_BLOCK_HEIGHT,
            scroll_top: 0.0,
            focused: None,
        }
    }

    pub fn set_searchable_tags(&mut self, tags: &[String]) {
        self.searchable_tags = tags.iter().map(|t| t.to_ascii_lowercase()).collect();
    }

    pub fn set_header_height(&mut self, height: Option<f64>) {
        self.header_height = height;
    }

    pub fn set_block_height(&mut self, height: f64) {
        self.block_height = height;
    }

    /// Add a top-level section. Container ids are unique across the page.
    pub fn add_section(&mut self, id: &str, title: &str) -> Result<ContainerSlot, ContentError> {
        self.add_container(ContainerKind::Section, id, title, None)
    }

    pub fn add_sub_section(
        &mut self,
        parent: ContainerSlot,
        id: &str,
        title: &str,
    ) -> Result<ContainerSlot, ContentError> {
        self.add_container(ContainerKind::SubSection, id, title, Some(parent))
    }

    pub fn add_accordion(
        &mut self,
        parent: ContainerSlot,
        id: &str,
        title: &str,
    ) -> Result<ContainerSlot, ContentError> {
        self.add_container(ContainerKind::Accordion, id, title, Some(parent))
    }

    /// Append a block. Blocks are numbered in document order.
    pub fn add_block(&mut self, parent: Option<ContainerSlot>, tag: &str, markup: &str) -> NodeId {
        let id = NodeId(self.blocks.len() as u32);
        self.blocks.push(Block {
            tag: tag.to_ascii_lowercase(),
            markup: markup.to_string(),
            classes: BTreeSet::new(),
            parent: parent.map(|p| p.0),
        });
        id
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Show a container using the site's visibility rules.
    pub fn open(&mut self, id: &str) -> Result<(), ContentError> {
        let idx = self.slot_of(id)?;
        let kind = self.containers[idx].kind;
        let parent = self.containers[idx].parent;

        match kind {
            ContainerKind::Section => {
                for c in self
                    .containers
                    .iter_mut()
                    .filter(|c| c.kind == ContainerKind::Section)
                {
                    c.open = false;
                }
            }
            ContainerKind::SubSection => {
                for c in self.containers.iter_mut().filter(|c| {
                    c.kind == ContainerKind::SubSection || c.kind == ContainerKind::Accordion
                }) {
                    c.open = false;
                }
            }
            ContainerKind::Accordion => {
                for c in self
                    .containers
                    .iter_mut()
                    .filter(|c| c.kind == ContainerKind::Accordion && c.parent == parent)
                {
                    c.open = false;
                }
            }
        }
        self.containers[idx].open = true;
        debug!(id, ?kind, "opened container");
        Ok(())
    }

    pub fn close(&mut self, id: &str) -> Result<(), ContentError> {
        let idx = self.slot_of(id)?;
        self.containers[idx].open = false;
        Ok(())
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.by_id
            .get(id)
            .is_some_and(|&idx| self.containers[idx].open)
    }

    pub fn markup_of(&self, node: NodeId) -> Option<&str> {
        self.blocks.get(node.index()).map(|b| b.markup.as_str())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.blocks
            .get(node.index())
            .is_some_and(|b| b.classes.contains(class))
    }

    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.classes.contains(class))
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    /// A block is visible when every ancestor container is open.
    pub fn is_node_visible(&self, node: NodeId) -> bool {
        self.blocks
            .get(node.index())
            .is_some_and(|b| self.chain_open(b.parent))
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn add_container(
        &mut self,
        kind: ContainerKind,
        id: &str,
        title: &str,
        parent: Option<ContainerSlot>,
    ) -> Result<ContainerSlot, ContentError> {
        if self.by_id.contains_key(id) {
            return Err(ContentError::DuplicateContainer(id.to_string()));
        }
        let idx = self.containers.len();
        self.containers.push(Container {
            kind,
            id: id.to_string(),
            title: title.to_string(),
            parent: parent.map(|p| p.0),
            open: false,
        });
        self.by_id.insert(id.to_string(), idx);
        Ok(ContainerSlot(idx))
    }

    fn slot_of(&self, id: &str) -> Result<usize, ContentError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| ContentError::ContainerNotFound(id.to_string()))
    }

    fn chain_open(&self, mut parent: Option<usize>) -> bool {
        while let Some(idx) = parent {
            let container = &self.containers[idx];
            if !container.open {
                return false;
            }
            parent = container.parent;
        }
        true
    }

    fn block_mut(&mut self, node: NodeId) -> Result<&mut Block, ContentError> {
        self.blocks
            .get_mut(node.index())
            .ok_or(ContentError::NodeNotFound(node))
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl ContentRoot for Page {
    fn searchable_nodes(&self) -> Vec<NodeId> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| self.searchable_tags.iter().any(|t| *t == b.tag))
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        self.markup_of(node).map(markup::text_content)
    }

    fn markup(&self, node: NodeId) -> Option<String> {
        self.markup_of(node).map(str::to_string)
    }

    fn replace_markup(&mut self, node: NodeId, markup: String) -> Result<(), ContentError> {
        self.block_mut(node)?.markup = markup;
        Ok(())
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) -> Result<(), ContentError> {
        let block = self.block_mut(node)?;
        if enabled {
            block.classes.insert(class.to_string());
        } else {
            block.classes.remove(class);
        }
        Ok(())
    }

    fn section_title(&self, section_id: &str) -> Option<String> {
        let idx = *self.by_id.get(section_id)?;
        let container = &self.containers[idx];
        (container.kind == ContainerKind::Section).then(|| container.title.clone())
    }
}

impl Reveal for Page {
    fn ancestors(&self, node: NodeId) -> Vec<ContainerRef> {
        let mut chain = Vec::new();
        let mut parent = self.blocks.get(node.index()).and_then(|b| b.parent);
        while let Some(idx) = parent {
            let container = &self.containers[idx];
            chain.push(ContainerRef::new(container.kind, container.id.clone()));
            parent = container.parent;
        }
        chain.reverse();
        chain
    }

    fn is_visible(&self, container: &ContainerRef) -> bool {
        self.is_open(&container.id)
    }

    fn reveal(&mut self, container: &ContainerRef) -> Result<(), ContentError> {
        if self.is_open(&container.id) {
            return Ok(());
        }
        self.open(&container.id)
    }
}

impl Viewport for Page {
    fn header_height(&self) -> Option<f64> {
        self.header_height
    }

    fn document_top(&self, node: NodeId) -> Option<f64> {
        if !self.is_node_visible(node) {
            return None;
        }
        let before = (0..node.index())
            .filter(|&i| self.is_node_visible(NodeId(i as u32)))
            .count();
        Some(before as f64 * self.block_height)
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top;
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Page {
        let mut page = Page::new();
        let beranda = page.add_section("beranda", "Beranda").unwrap();
        page.add_block(Some(beranda), "h2", "Prosedur Kepailitan");
        let proses = page.add_section("proses", "Proses").unwrap();
        let a = page.add_sub_section(proses, "permohonan", "Permohonan").unwrap();
        let b = page.add_sub_section(proses, "putusan", "Putusan").unwrap();
        let acc1 = page.add_accordion(a, "syarat", "Syarat").unwrap();
        let acc2 = page.add_accordion(a, "pemohon", "Pemohon").unwrap();
        page.add_block(Some(acc1), "li", "Dua kreditor");
        page.add_block(Some(acc2), "li", "Debitor sendiri");
        page.add_block(Some(b), "p", "Putusan pailit");
        page
    }

    #[test]
    fn one_section_open_at_a_time() {
        let mut page = site();
        page.open("beranda").unwrap();
        page.open("proses").unwrap();
        assert!(page.is_open("proses"));
        assert!(!page.is_open("beranda"));
    }

    #[test]
    fn opening_sub_section_collapses_others_and_accordions() {
        let mut page = site();
        page.open("proses").unwrap();
        page.open("permohonan").unwrap();
        page.open("syarat").unwrap();

        page.open("putusan").unwrap();

        assert!(page.is_open("putusan"));
        assert!(!page.is_open("permohonan"));
        assert!(!page.is_open("syarat"));
    }

    #[test]
    fn accordion_siblings_are_exclusive() {
        let mut page = site();
        page.open("syarat").unwrap();
        page.open("pemohon").unwrap();
        assert!(page.is_open("pemohon"));
        assert!(!page.is_open("syarat"));
    }

    #[test]
    fn unknown_container_is_an_error() {
        let mut page = site();
        let err = page.open("tidak-ada").unwrap_err();
        assert!(matches!(err, ContentError::ContainerNotFound(_)));
    }

    #[test]
    fn duplicate_container_id_is_rejected() {
        let mut page = site();
        let proses = page.add_section("proses-2", "Proses").unwrap();

        let err = page.add_accordion(proses, "syarat", "Syarat lain").unwrap_err();
        assert!(matches!(err, ContentError::DuplicateContainer(ref id) if id == "syarat"));
        let err = page.add_section("beranda", "Beranda").unwrap_err();
        assert_eq!(err.to_string(), "duplicate container id 'beranda'");

        // The first container keeps the id.
        let chain = page.ancestors(NodeId(1));
        assert_eq!(chain[1].id, "permohonan");
        assert_eq!(chain[2].id, "syarat");
    }

    #[test]
    fn ancestors_are_outermost_first() {
        let page = site();
        let chain = page.ancestors(NodeId(1));
        let ids: Vec<&str> = chain.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["proses", "permohonan", "syarat"]);
        assert_eq!(chain[0].kind, ContainerKind::Section);
        assert_eq!(chain[2].kind, ContainerKind::Accordion);
    }

    #[test]
    fn hidden_nodes_are_still_searchable() {
        let page = site();
        assert_eq!(page.searchable_nodes().len(), 4);
        assert!(!page.is_node_visible(NodeId(3)));
    }

    #[test]
    fn searchable_tags_ignore_case() {
        let mut page = Page::new();
        page.add_block(None, "TD", "Rp1.000");
        page.add_block(None, "div", "Rp2.000");
        page.add_block(None, "h1", "Judul");
        assert_eq!(page.searchable_nodes(), vec![NodeId(0)]);

        page.set_searchable_tags(&["DIV".to_string()]);
        assert_eq!(page.searchable_nodes(), vec![NodeId(1)]);
    }

    #[test]
    fn document_top_counts_visible_blocks_only() {
        let mut page = site();
        page.set_block_height(10.0);
        assert_eq!(page.document_top(NodeId(3)), None);

        page.open("proses").unwrap();
        page.open("putusan").unwrap();

        // Only the putusan paragraph is visible.
        assert_eq!(page.document_top(NodeId(3)), Some(0.0));
        page.open("beranda").unwrap();
        assert_eq!(page.document_top(NodeId(0)), Some(0.0));
        assert_eq!(page.document_top(NodeId(3)), None);
    }

    #[test]
    fn set_class_on_missing_node_fails() {
        let mut page = site();
        let err = page.set_class(NodeId(42), "x", true).unwrap_err();
        assert!(matches!(err, ContentError::NodeNotFound(NodeId(42))));
    }

    #[test]
    fn section_title_lookup() {
        let page = site();
        assert_eq!(page.section_title("proses").as_deref(), Some("Proses"));
        assert_eq!(page.section_title("permohonan"), None);
    }
}
