//! Offline cache (service worker) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    /// Versioned cache name; bumping it evicts every older cache.
    pub cache_name: String,
    /// Assets stored at install time.
    pub precache: Vec<String>,
    /// Hosts served network-first with the cache as fallback.
    pub network_first_hosts: Vec<String>,
    /// Page served to navigations when both cache and network miss.
    pub offline_fallback: String,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            cache_name: "prosedur-kepailitan-v1".into(),
            precache: vec![
                "/".into(),
                "/index.html".into(),
                "/styles.css".into(),
                "/print.css".into(),
                "/scripts.js".into(),
                "https://cdn.tailwindcss.com".into(),
                "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap"
                    .into(),
            ],
            network_first_hosts: vec![
                "cdn.tailwindcss.com".into(),
                "fonts.googleapis.com".into(),
                "fonts.gstatic.com".into(),
            ],
            offline_fallback: "/index.html".into(),
        }
    }
}
