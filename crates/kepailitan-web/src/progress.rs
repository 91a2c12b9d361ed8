//! Reading progress and quiz results, persisted in a key-value store with
//! the same keys and JSON shapes the site keeps in `localStorage`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use kepailitan_common::StorageError;
use kepailitan_config::schema::ProgressConfig;
use kepailitan_config::toml_loader;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// String key-value storage (the `localStorage` contract).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key: path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };
        Ok(Self { path, entries })
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        toml_loader::default_storage_path().ok()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        toml_loader::ensure_parent_dir(&self.path)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Last submitted quiz, as stored under the quiz key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
}

impl QuizResult {
    pub fn new(score: u32, total: u32, at: DateTime<Utc>) -> Self {
        Self {
            score,
            total,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total) * 100.0
    }

    pub fn feedback(&self) -> &'static str {
        score_feedback(self.score, self.total)
    }
}

/// Feedback line shown with a quiz score.
pub fn score_feedback(score: u32, total: u32) -> &'static str {
    let percentage = if total == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(total) * 100.0
    };
    if percentage >= 80.0 {
        "Sangat baik! Anda telah memahami konsep dasar kepailitan dengan baik."
    } else if percentage >= 60.0 {
        "Cukup baik! Anda memiliki pemahaman yang cukup tentang kepailitan."
    } else {
        "Silakan pelajari kembali materi kepailitan untuk meningkatkan pemahaman Anda."
    }
}

/// Tracks which sections have been visited.
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    config: ProgressConfig,
    /// Visited section ids in first-visit order.
    visited: Vec<String>,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S, config: ProgressConfig) -> Self {
        Self {
            store,
            config,
            visited: Vec::new(),
        }
    }

    /// Load saved progress. Corrupt data is removed and progress starts
    /// over.
    pub fn restore(&mut self) -> &[String] {
        let key = self.config.storage_key.clone();
        if let Some(raw) = self.store.get(&key) {
            match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => {
                    self.visited.clear();
                    for id in ids {
                        if !self.visited.contains(&id) {
                            self.visited.push(id);
                        }
                    }
                    debug!(visited = self.visited.len(), "restored progress");
                }
                Err(e) => {
                    warn!(key = %key, "resetting corrupt progress: {e}");
                    if let Err(e) = self.store.remove(&key) {
                        warn!(key = %key, "failed to remove corrupt progress: {e}");
                    }
                    self.visited.clear();
                }
            }
        }
        &self.visited
    }

    /// Record a visit and persist. Returns the new percentage.
    pub fn track(&mut self, section_id: &str) -> Result<u32, StorageError> {
        if !self.visited.iter().any(|v| v == section_id) {
            self.visited.push(section_id.to_string());
        }
        self.save()?;
        Ok(self.percent())
    }

    /// round(visited / total * 100).
    pub fn percent(&self) -> u32 {
        if self.config.total_sections == 0 {
            return 0;
        }
        (self.visited.len() as f64 / f64::from(self.config.total_sections) * 100.0).round() as u32
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn save_quiz_result(&mut self, result: &QuizResult) -> Result<(), StorageError> {
        let raw = serde_json::to_string(result).map_err(|e| StorageError::Corrupt {
            key: self.config.quiz_storage_key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&self.config.quiz_storage_key, raw)
    }

    pub fn last_quiz_result(&self) -> Option<QuizResult> {
        let raw = self.store.get(&self.config.quiz_storage_key)?;
        serde_json::from_str(&raw)
            .map_err(|e| debug!("ignoring stored quiz result: {e}"))
            .ok()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn save(&mut self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.visited).map_err(|e| StorageError::Corrupt {
            key: self.config.storage_key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&self.config.storage_key, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tracker() -> ProgressTracker<MemoryStore> {
        ProgressTracker::new(MemoryStore::new(), ProgressConfig::default())
    }

    #[test]
    fn tracking_persists_visited_ids() {
        let mut tracker = tracker();
        assert_eq!(tracker.track("beranda").unwrap(), 13);
        assert_eq!(tracker.track("beranda").unwrap(), 13);
        assert_eq!(tracker.track("syarat").unwrap(), 25);
        assert_eq!(
            tracker.store().get("pailitProgress").as_deref(),
            Some(r#"["beranda","syarat"]"#)
        );
    }

    #[test]
    fn restore_reads_saved_progress() {
        let mut store = MemoryStore::new();
        store
            .set("pailitProgress", r#"["a","b","a","c","d"]"#.into())
            .unwrap();
        let mut tracker = ProgressTracker::new(store, ProgressConfig::default());

        assert_eq!(tracker.restore(), ["a", "b", "c", "d"]);
        assert_eq!(tracker.percent(), 50);
    }

    #[test]
    fn corrupt_progress_is_removed() {
        let mut store = MemoryStore::new();
        store.set("pailitProgress", "{oops".into()).unwrap();
        let mut tracker = ProgressTracker::new(store, ProgressConfig::default());

        assert!(tracker.restore().is_empty());
        assert_eq!(tracker.store().get("pailitProgress"), None);
        assert_eq!(tracker.percent(), 0);
    }

    #[test]
    fn quiz_result_round_trip() {
        let mut tracker = tracker();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        tracker.save_quiz_result(&QuizResult::new(4, 5, at)).unwrap();

        let raw = tracker.store().get("pailkitQuizScore").unwrap();
        assert_eq!(
            raw,
            r#"{"score":4,"total":5,"timestamp":"2024-05-01T08:30:00.000Z"}"#
        );
        let stored = tracker.last_quiz_result().unwrap();
        assert_eq!(stored.percentage(), 80.0);
        assert!(stored.feedback().starts_with("Sangat baik!"));
    }

    #[test]
    fn feedback_thresholds() {
        assert!(score_feedback(8, 10).starts_with("Sangat baik!"));
        assert!(score_feedback(6, 10).starts_with("Cukup baik!"));
        assert!(score_feedback(5, 10).starts_with("Silakan pelajari kembali"));
        assert!(score_feedback(0, 0).starts_with("Silakan pelajari kembali"));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("pailitProgress", r#"["beranda"]"#.into()).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("pailitProgress").as_deref(), Some(r#"["beranda"]"#));
    }

    #[test]
    fn file_store_default_path_matches_config_layout() {
        assert_eq!(
            FileStore::default_path(),
            toml_loader::default_storage_path().ok()
        );
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1,2").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
