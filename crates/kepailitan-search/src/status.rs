//! UI-facing search status and position indicator.

use std::fmt;

use serde::Serialize;

/// Outcome of the last search submission, shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStatus {
    /// No query submitted, or the query was cleared.
    #[default]
    Idle,
    /// The trimmed query is shorter than the configured minimum.
    TooShort { min_chars: u32 },
    NoResults { query: String },
    Found { query: String, count: usize },
}

impl SearchStatus {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchStatus::Idle => "idle",
            SearchStatus::TooShort { .. } => "too_short",
            SearchStatus::NoResults { .. } => "no_results",
            SearchStatus::Found { .. } => "found",
        }
    }

    /// Whether previous/next controls may be enabled at all.
    pub fn has_results(&self) -> bool {
        matches!(self, SearchStatus::Found { .. })
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Idle => Ok(()),
            SearchStatus::TooShort { min_chars } => write!(
                f,
                "Masukkan minimal {min_chars} karakter untuk memulai pencarian."
            ),
            SearchStatus::NoResults { query } => {
                write!(f, "Tidak ada hasil ditemukan untuk \"{query}\".")
            }
            SearchStatus::Found { query, count } => {
                write!(f, "Ditemukan {count} hasil untuk \"{query}\".")
            }
        }
    }
}

/// 1-based "k dari n" position of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dari {}", self.current, self.total)
    }
}
