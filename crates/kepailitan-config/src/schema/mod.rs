//! Configuration schema types for the Prosedur Kepailitan site.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the values the published site uses.

mod bindings;
mod offline;
mod progress;
mod search;
mod system;

pub use bindings::*;
pub use offline::*;
pub use progress::*;
pub use search::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub search: SearchConfig,
    pub bindings: BindingsConfig,
    pub progress: ProgressConfig,
    pub offline: OfflineConfig,
    pub logging: LoggingConfig,
}
