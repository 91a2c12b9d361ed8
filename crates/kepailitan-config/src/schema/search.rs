//! Search engine configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tags whose elements are scanned by the search engine.
pub const DEFAULT_SEARCHABLE_TAGS: &[&str] = &["p", "li", "h2", "h3", "h4", "h5", "td", "th"];

/// Search, highlight and navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum trimmed query length in characters (valid range: 1-32).
    pub min_query_chars: u32,
    pub searchable_tags: Vec<String>,
    /// Element wrapped around every occurrence.
    pub highlight_tag: String,
    pub highlight_class: String,
    /// Class toggled on the element holding the current match.
    pub active_class: String,
    /// Delay between revealing a container and measuring the scroll target,
    /// in milliseconds (valid range: 0-5000).
    pub reveal_delay_ms: u32,
    /// Header height used when the page reports none.
    pub header_fallback_height: f64,
    /// Gap kept between the sticky header and the scrolled-to element.
    pub scroll_margin: f64,
    /// Excerpts shown per section in the result summary (valid range: 1-10).
    pub summary_excerpts: u32,
}

impl SearchConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.reveal_delay_ms))
    }

    pub fn marker_open(&self) -> String {
        format!("<{} class=\"{}\">", self.highlight_tag, self.highlight_class)
    }

    pub fn marker_close(&self) -> String {
        format!("</{}>", self.highlight_tag)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            searchable_tags: DEFAULT_SEARCHABLE_TAGS.iter().map(|t| t.to_string()).collect(),
            highlight_tag: "mark".into(),
            highlight_class: "search-highlight".into(),
            active_class: "search-highlight-active".into(),
            reveal_delay_ms: 300,
            header_fallback_height: 70.0,
            scroll_margin: 20.0,
            summary_excerpts: 3,
        }
    }
}
