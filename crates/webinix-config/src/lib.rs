//! Webinix configuration.
//!
//! TOML-based configuration for library discovery, script defaults, window
//! presentation, cache cleanup and logging. All sections use defaults so
//! partial configs work out of the box.
//!
//! ```rust,no_run
//! use webinix_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.script.max_response_bytes);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::WebinixConfig;

use std::path::{Path, PathBuf};
use webinix_common::ConfigError;

/// Environment variable that overrides `library.search_dir`.
pub const LIBRARY_DIR_ENV: &str = "WEBINIX_LIBRARY_DIR";

/// Load config from `path`, or from the platform default when `None`,
/// apply environment overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<WebinixConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };

    if let Ok(dir) = std::env::var(LIBRARY_DIR_ENV) {
        apply_library_dir_override(&mut config, &dir);
    }

    validation::validate(&config)?;
    Ok(config)
}

fn apply_library_dir_override(config: &mut WebinixConfig, dir: &str) {
    let dir = dir.trim();
    if dir.is_empty() {
        return;
    }
    tracing::debug!("{LIBRARY_DIR_ENV} overrides library.search_dir with {dir}");
    config.library.search_dir = Some(PathBuf::from(dir));
}
