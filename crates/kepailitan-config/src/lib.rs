//! Configuration for the Prosedur Kepailitan search engine and site shell.
//!
//! TOML-based configuration with full validation. All config sections use
//! defaults matching the published site so partial configs work out of
//! the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kepailitan_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{SearchConfig, SiteConfig, CONFIG_SCHEMA_VERSION};

use kepailitan_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a default
/// if none exists. A config that fails validation yields the defaults.
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &SiteConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
