//! System configuration types: startup, cache, and logging.

use serde::{Deserialize, Serialize};

/// Startup behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupConfig {
    /// Seconds the library waits for the browser to connect
    /// (valid range: 1-3600).
    pub timeout_secs: u32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Temporary cache directory created by the library next to the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory name, relative to the current working directory.
    pub dir: String,
    /// Remove the directory after `wait()` returns.
    pub cleanup_on_wait: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: "__intcache__".into(),
            cleanup_on_wait: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl LoggingConfig {
    /// `tracing-subscriber` filter directive for the webinix crates.
    pub fn directive(&self) -> String {
        format!("webinix={}", self.level.as_str())
    }
}
