use serde::{Deserialize, Serialize};
use std::fmt;

/// Small per-process window number issued by the native library.
///
/// Used as the local lookup key for bindings; the opaque native handle is
/// kept separately by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Category of a browser-originated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// The page lost its connection to the native side.
    Disconnected,
    /// The page connected to the native side.
    Connected,
    /// A bound element was clicked.
    MouseClick,
    /// The page navigated to another URL.
    Navigation,
    /// A bound function was called from script.
    Callback,
    /// A code this version does not know about.
    Other(u32),
}

impl EventType {
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => Self::Disconnected,
            1 => Self::Connected,
            2 => Self::MouseClick,
            3 => Self::Navigation,
            4 => Self::Callback,
            other => Self::Other(other),
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            Self::Disconnected => 0,
            Self::Connected => 1,
            Self::MouseClick => 2,
            Self::Navigation => 3,
            Self::Callback => 4,
            Self::Other(code) => code,
        }
    }
}

/// Browser used to display a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Any,
    Chrome,
    Firefox,
    Edge,
    Safari,
    Chromium,
    Custom,
}

impl Browser {
    pub fn as_raw(self) -> u32 {
        match self {
            Self::Any => 0,
            Self::Chrome => 1,
            Self::Firefox => 2,
            Self::Edge => 3,
            Self::Safari => 4,
            Self::Chromium => 5,
            Self::Custom => 99,
        }
    }

    /// Parse a browser name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "any" => Some(Self::Any),
            "chrome" => Some(Self::Chrome),
            "firefox" => Some(Self::Firefox),
            "edge" => Some(Self::Edge),
            "safari" => Some(Self::Safari),
            "chromium" => Some(Self::Chromium),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Script runtime used by the library to execute `.js` / `.ts` files it
/// serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    #[default]
    None,
    Deno,
    NodeJs,
}

impl Runtime {
    pub fn as_raw(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Deno => 1,
            Self::NodeJs => 2,
        }
    }
}
