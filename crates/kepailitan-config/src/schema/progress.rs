//! Reading progress and quiz result storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Storage key holding the JSON array of visited section ids.
    pub storage_key: String,
    /// Storage key holding the last quiz result.
    pub quiz_storage_key: String,
    /// Number of sections counted towards 100% (valid range: 1-100).
    pub total_sections: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            storage_key: "pailitProgress".into(),
            quiz_storage_key: "pailkitQuizScore".into(),
            total_sections: 8,
        }
    }
}
