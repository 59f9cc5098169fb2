//! Configuration schema types for the webinix bridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod library;
mod script;
mod system;
mod window;

pub use library::*;
pub use script::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WebinixConfig {
    pub library: LibraryConfig,
    pub startup: StartupConfig,
    pub script: ScriptConfig,
    pub window: WindowConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}
