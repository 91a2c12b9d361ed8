//! Search, highlight and navigate engine for the Prosedur Kepailitan site.
//!
//! Provides:
//! - Case-insensitive literal matching over searchable content nodes
//! - Highlight markers that survive inline formatting and restore exactly
//! - Match navigation with ancestor reveal and deferred scrolling
//! - Status text and a per-section result summary
//! - An in-memory [`Page`] document with the site's visibility rules

pub mod content;
pub mod cursor;
pub mod engine;
pub mod finder;
pub mod highlight;
pub mod markup;
pub mod page;
pub mod pattern;
pub mod session;
pub mod status;
pub mod summary;


pub use content::{ContainerKind, ContainerRef, ContentRoot, Reveal, Viewport};
pub use cursor::PendingScroll;
pub use engine::SearchEngine;
pub use highlight::HighlightRenderer;
pub use kepailitan_common::NodeId;
pub use page::{Page, PageOutline};
pub use pattern::QueryPattern;
pub use session::{Match, SearchSession};
pub use status::{Position, SearchStatus};
pub use summary::SectionHits;
