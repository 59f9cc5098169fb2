//! Script execution defaults.

use serde::{Deserialize, Serialize};

/// Defaults used by `Window::script`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScriptConfig {
    /// Seconds to wait for a response. 0 waits indefinitely.
    pub timeout_secs: u32,
    /// Size of the response buffer in bytes (valid range: 1-16777216).
    pub max_response_bytes: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 0,
            max_response_bytes: 8 * 1024,
        }
    }
}
