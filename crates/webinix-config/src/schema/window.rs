//! Window presentation settings.

use serde::{Deserialize, Serialize};
use webinix_common::{Browser, Runtime};

/// Settings applied to every window created by the demo app.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    pub browser: Browser,
    pub runtime: Runtime,
    /// Allow the window URL to be opened from more than one browser tab.
    pub multi_access: bool,
    pub kiosk: bool,
}
