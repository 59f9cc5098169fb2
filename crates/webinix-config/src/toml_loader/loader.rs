//! Reading the config file, and writing the template on first run.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use webinix_common::ConfigError;

use super::template::default_config_toml;
use crate::schema::WebinixConfig;
use crate::validation;

const CONFIG_DIR_NAME: &str = "webinix";
const CONFIG_FILE_NAME: &str = "config.toml";

fn io_error(path: &Path, e: io::Error) -> ConfigError {
    match e.kind() {
        io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

/// `<platform config dir>/webinix/config.toml`, e.g.
/// `~/.config/webinix/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. A config that fails
/// validation is still returned; the problems are logged.
pub fn load_from_path(path: &Path) -> Result<WebinixConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;

    let config: WebinixConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Write the documented template to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_error(path, e))?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Load config from [`default_config_path`].
///
/// On first run the template is written there and defaults are returned. A
/// template that cannot be written only costs a warning.
pub fn load_default() -> Result<WebinixConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            if let Err(e) = write_default_config(&path) {
                warn!("could not write default config: {e}");
            }
            Ok(WebinixConfig::default())
        }
        other => other,
    }
}
