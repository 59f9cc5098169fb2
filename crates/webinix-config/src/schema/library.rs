//! Native library discovery settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to look for the webinix shared library.
///
/// The current working directory is always searched first; `search_dir` is
/// the fallback. `file_name` replaces the platform default
/// (`webinix-2-x64.so` / `.dylib` / `.dll`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LibraryConfig {
    pub search_dir: Option<PathBuf>,
    pub file_name: Option<String>,
}
