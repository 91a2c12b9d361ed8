//! Progress storage and offline cache validation.

use crate::schema::SiteConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_progress(errors: &mut Vec<String>, config: &SiteConfig) {
    validate_non_empty(errors, "progress.storage_key", &config.progress.storage_key);
    validate_non_empty(
        errors,
        "progress.quiz_storage_key",
        &config.progress.quiz_storage_key,
    );
    if config.progress.storage_key == config.progress.quiz_storage_key {
        errors.push("progress.quiz_storage_key must differ from progress.storage_key".into());
    }
    validate_range(
        errors,
        "progress.total_sections",
        config.progress.total_sections,
        1,
        100,
    );
}

pub(crate) fn validate_offline(errors: &mut Vec<String>, config: &SiteConfig) {
    validate_non_empty(errors, "offline.cache_name", &config.offline.cache_name);
    if !config.offline.offline_fallback.starts_with('/') {
        errors.push(format!(
            "offline.offline_fallback = '{}' must be an absolute path",
            config.offline.offline_fallback
        ));
    }
    for host in &config.offline.network_first_hosts {
        if host.trim().is_empty() || host.contains('/') {
            errors.push(format!("offline.network_first_hosts entry '{host}' is not a host"));
        }
    }
}
