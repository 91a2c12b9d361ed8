//! Literal, case-insensitive query pattern shared by finder and renderer.

use std::ops::Range;

use kepailitan_common::SearchError;
use regex::{Regex, RegexBuilder};

/// A trimmed query compiled into an escaped, case-insensitive regex.
///
/// Metacharacters in the query are matched literally, so `Rp1.000` never
/// matches `Rp1X000`.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    query: String,
    regex: Regex,
}

impl QueryPattern {
    pub fn new(query: &str) -> Result<Self, SearchError> {
        let query = query.trim().to_string();
        let regex = RegexBuilder::new(&regex::escape(&query))
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::Pattern(e.to_string()))?;
        Ok(Self { query, regex })
    }

    /// The trimmed query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.query.is_empty() && self.regex.is_match(text)
    }

    /// Byte ranges of every non-overlapping occurrence in `text`.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        if self.query.is_empty() {
            return Vec::new();
        }
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignoring_case() {
        let pattern = QueryPattern::new("kreditor").unwrap();
        assert!(pattern.is_match("Kreditor separatis adalah..."));
        assert!(pattern.is_match("KREDITOR"));
        assert!(!pattern.is_match("Debitor pailit wajib..."));
    }

    #[test]
    fn query_is_trimmed() {
        let pattern = QueryPattern::new("  kurator \t").unwrap();
        assert_eq!(pattern.query(), "kurator");
    }

    #[test]
    fn metacharacters_match_literally() {
        let pattern = QueryPattern::new("Rp1.000").unwrap();
        assert!(pattern.is_match("utang sebesar rp1.000 juta"));
        assert!(!pattern.is_match("utang sebesar Rp1X000 juta"));

        let pattern = QueryPattern::new("(a+b)*").unwrap();
        assert!(pattern.is_match("rumus (A+B)* berlaku"));
        assert!(!pattern.is_match("aab"));
    }

    #[test]
    fn finds_all_occurrences() {
        let pattern = QueryPattern::new("pailit").unwrap();
        let ranges = pattern.find_ranges("Pailit, kepailitan, PAILIT");
        assert_eq!(ranges, vec![0..6, 10..16, 20..26]);
    }

    #[test]
    fn empty_query_never_matches() {
        let pattern = QueryPattern::new("   ").unwrap();
        assert!(!pattern.is_match("anything"));
        assert!(pattern.find_ranges("anything").is_empty());
    }
}
