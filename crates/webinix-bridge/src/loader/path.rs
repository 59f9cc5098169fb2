//! Library path resolution.

use std::path::{Path, PathBuf};

use tracing::debug;
use webinix_common::LoadError;
use webinix_config::schema::LibraryConfig;

/// Platform file name of the prebuilt webinix library.
pub fn default_library_name() -> Option<&'static str> {
    if cfg!(target_os = "windows") {
        Some("webinix-2-x64.dll")
    } else if cfg!(target_os = "macos") {
        Some("webinix-2-x64.dylib")
    } else if cfg!(unix) {
        Some("webinix-2-x64.so")
    } else {
        None
    }
}

/// Where to look for the library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySearch {
    /// Searched first. `None` uses the process working directory.
    pub working_dir: Option<PathBuf>,
    /// Searched second. `None` uses the directory of the running executable.
    pub fallback_dir: Option<PathBuf>,
    /// Overrides [`default_library_name`].
    pub file_name: Option<String>,
}

impl LibrarySearch {
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self {
            working_dir: None,
            fallback_dir: config.search_dir.clone(),
            file_name: config.file_name.clone(),
        }
    }

    fn file_name(&self) -> Result<&str, LoadError> {
        match &self.file_name {
            Some(name) => Ok(name),
            None => default_library_name().ok_or(LoadError::Unsupported),
        }
    }

    fn candidate_dirs(&self) -> Vec<PathBuf> {
        let cwd = self
            .working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok());
        let fallback = self.fallback_dir.clone().or_else(executable_dir);
        cwd.into_iter().chain(fallback).collect()
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Resolve the library path.
///
/// Returns the first candidate that exists, or the last one checked when
/// none does; opening it will then report the failure. Only an unknown
/// platform file name is an error here.
pub fn resolve_path(search: &LibrarySearch) -> Result<PathBuf, LoadError> {
    let file_name = search.file_name()?;
    let mut last = PathBuf::from(file_name);

    for dir in search.candidate_dirs() {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            debug!(path = %candidate.display(), "webinix library found");
            return Ok(candidate);
        }
        last = candidate;
    }

    debug!(path = %last.display(), "webinix library not found, using last candidate");
    Ok(last)
}
