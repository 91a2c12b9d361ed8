//! Contracts between the engine and the document it searches.
//!
//! The engine never touches a document directly; it goes through these
//! traits so the same logic drives a browser DOM bridge, the in-memory
//! [`Page`](crate::page::Page), or a test double.

use kepailitan_common::{ContentError, NodeId};
use serde::{Deserialize, Serialize};

/// Kind of collapsible container a searchable node can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Top-level content section; one is shown at a time.
    Section,
    /// Sub-content section opened from a process card.
    SubSection,
    /// Accordion item.
    Accordion,
}

/// Reference to a collapsible container by kind and element id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRef {
    pub kind: ContainerKind,
    pub id: String,
}

impl ContainerRef {
    pub fn new(kind: ContainerKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// The searchable subtree.
pub trait ContentRoot {
    /// Every searchable node in document order. Hidden sections are included.
    fn searchable_nodes(&self) -> Vec<NodeId>;

    /// Rendered text of a node (what `textContent` would return).
    fn text_content(&self, node: NodeId) -> Option<String>;

    /// Current inner markup of a node.
    fn markup(&self, node: NodeId) -> Option<String>;

    fn replace_markup(&mut self, node: NodeId, markup: String) -> Result<(), ContentError>;

    /// Add or remove a class on the node element itself.
    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) -> Result<(), ContentError>;

    /// Display title of a section, if the document knows one.
    fn section_title(&self, _section_id: &str) -> Option<String> {
        None
    }
}

/// Section, sub-section and accordion visibility.
pub trait Reveal {
    /// Collapsible ancestors of `node`, outermost first.
    fn ancestors(&self, node: NodeId) -> Vec<ContainerRef>;

    fn is_visible(&self, container: &ContainerRef) -> bool;

    /// Show `container`. Idempotent when it is already visible.
    fn reveal(&mut self, container: &ContainerRef) -> Result<(), ContentError>;
}

/// Scroll position and focus.
pub trait Viewport {
    /// Height of the fixed header, if one is rendered.
    fn header_height(&self) -> Option<f64>;

    /// Offset of `node` from the top of the document, `None` while hidden.
    fn document_top(&self, node: NodeId) -> Option<f64>;

    fn scroll_to(&mut self, top: f64);

    /// Move keyboard focus to `node` without scrolling again.
    fn focus(&mut self, node: NodeId);
}
