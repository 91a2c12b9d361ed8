//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod misc;
mod search;


use crate::schema::SiteConfig;
use kepailitan_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    search::validate_search(&mut errors, config);
    search::validate_bindings(&mut errors, config);
    misc::validate_progress(&mut errors, config);
    misc::validate_offline(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
