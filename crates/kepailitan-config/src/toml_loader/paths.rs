//! Where the site keeps its files on this machine.
//!
//! Config lives under the platform config directory, reading progress
//! under the platform data directory, both in a `kepailitan` folder.

use kepailitan_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "kepailitan";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";

/// Default config file, e.g. `~/.config/kepailitan/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    app_file(dirs::config_dir(), "config", CONFIG_FILE)
}

/// Default progress store, e.g. `~/.local/share/kepailitan/storage.json`
/// on Linux and `~/Library/Application Support/kepailitan/storage.json`
/// on macOS.
pub fn default_storage_path() -> Result<PathBuf, ConfigError> {
    app_file(dirs::data_dir(), "data", STORAGE_FILE)
}

fn app_file(base: Option<PathBuf>, kind: &str, file: &str) -> Result<PathBuf, ConfigError> {
    let base = base
        .ok_or_else(|| ConfigError::ParseError(format!("could not determine {kind} directory")))?;
    Ok(base.join(APP_DIR).join(file))
}

/// Create the directory `path` will be written into.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Write the commented default config to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    ensure_parent_dir(path).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to create config directory for {}: {e}",
            path.display()
        ))
    })?;

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
