//! Serializable page outline, used to load content from JSON.

use kepailitan_common::{ContentError, KepailitanError};
use serde::{Deserialize, Serialize};

use super::{ContainerSlot, Page};

/// Whole-page outline: sections in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOutline {
    /// Rendered height of the fixed header, if any.
    pub header_height: Option<f64>,
    pub sections: Vec<SectionOutline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionOutline {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Whether the section starts out shown.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub items: Vec<OutlineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineItem {
    Block {
        tag: String,
        html: String,
    },
    SubSection {
        id: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        active: bool,
        #[serde(default)]
        items: Vec<OutlineItem>,
    },
    Accordion {
        id: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        active: bool,
        #[serde(default)]
        items: Vec<OutlineItem>,
    },
}

impl Page {
    /// Build a page from an outline. Container ids must be unique.
    pub fn from_outline(outline: &PageOutline) -> Result<Page, ContentError> {
        let mut page = Page::new();
        page.set_header_height(outline.header_height);

        let mut initially_open = Vec::new();

        for section in &outline.sections {
            require_id(&section.id)?;
            let slot = page.add_section(&section.id, &section.title)?;
            if section.active {
                initially_open.push(section.id.clone());
            }
            add_items(&mut page, slot, &section.items, &mut initially_open)?;
        }

        // Outer containers first so the exclusivity rules see final state.
        for id in &initially_open {
            page.open(id)?;
        }
        Ok(page)
    }

    pub fn from_json(json: &str) -> Result<Page, KepailitanError> {
        let outline: PageOutline = serde_json::from_str(json)?;
        Ok(Page::from_outline(&outline)?)
    }
}

fn require_id(id: &str) -> Result<(), ContentError> {
    if id.is_empty() {
        return Err(ContentError::InvalidOutline("container id is empty".into()));
    }
    Ok(())
}

fn add_items(
    page: &mut Page,
    parent: ContainerSlot,
    items: &[OutlineItem],
    initially_open: &mut Vec<String>,
) -> Result<(), ContentError> {
    for item in items {
        match item {
            OutlineItem::Block { tag, html } => {
                page.add_block(Some(parent), tag, html);
            }
            OutlineItem::SubSection {
                id,
                title,
                active,
                items,
            } => {
                require_id(id)?;
                let slot = page.add_sub_section(parent, id, title)?;
                if *active {
                    initially_open.push(id.clone());
                }
                add_items(page, slot, items, initially_open)?;
            }
            OutlineItem::Accordion {
                id,
                title,
                active,
                items,
            } => {
                require_id(id)?;
                let slot = page.add_accordion(parent, id, title)?;
                if *active {
                    initially_open.push(id.clone());
                }
                add_items(page, slot, items, initially_open)?;
            }
        }
    }
    Ok(())
}
