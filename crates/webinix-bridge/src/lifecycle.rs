//! Process Lifecycle Controller: `wait`, `exit`, the startup timeout and
//! cache cleanup after the event loop ends.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use webinix_common::LoadError;

use crate::context::Webinix;

/// Removes the library's cache directory when dropped, so cleanup also runs
/// if `wait` unwinds.
struct CacheCleanup {
    dir: PathBuf,
}

impl CacheCleanup {
    fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Relative directories are resolved against the working directory at
    /// cleanup time.
    fn resolve(&self) -> Option<PathBuf> {
        if self.dir.is_absolute() {
            return Some(self.dir.clone());
        }
        match std::env::current_dir() {
            Ok(cwd) => Some(cwd.join(&self.dir)),
            Err(e) => {
                warn!(error = %e, "cannot resolve working directory, skipping cache cleanup");
                None
            }
        }
    }
}

impl Drop for CacheCleanup {
    fn drop(&mut self) {
        if let Some(path) = self.resolve() {
            remove_cache_dir(&path);
        }
    }
}

/// Recursively delete `path`. A missing directory is not an error; anything
/// else is logged and ignored. Returns whether something was removed.
pub(crate) fn remove_cache_dir(path: &Path) -> bool {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "cache directory removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove cache directory");
            false
        }
    }
}

impl Webinix {
    /// Block until every window is closed or [`Webinix::exit`] is called.
    ///
    /// Loads the library if needed. Afterwards the cache directory is removed
    /// unless cleanup is disabled.
    pub fn wait(&self) -> Result<(), LoadError> {
        let backend = self.inner.backend()?;
        let _cleanup = self.inner.settings.cache_dir.clone().map(CacheCleanup::new);

        info!("waiting for windows to close");
        backend.wait();
        info!("event loop finished");
        Ok(())
    }

    /// Close every window and unblock [`Webinix::wait`]. Does nothing if the
    /// library was never loaded.
    pub fn exit(&self) {
        match self.inner.loaded() {
            Some(backend) => {
                info!("exit requested");
                backend.exit();
            }
            None => debug!("exit before library load ignored"),
        }
    }

    /// Seconds the library waits for a browser to connect. Zero waits
    /// indefinitely. Loads the library if needed.
    pub fn set_timeout(&self, seconds: u32) -> Result<(), LoadError> {
        let backend = self.inner.backend()?;
        backend.set_timeout(seconds);
        debug!(seconds, "startup timeout set");
        Ok(())
    }

    /// Whether the library's event loop is running. `false` before load.
    pub fn is_app_running(&self) -> bool {
        self.inner
            .loaded()
            .is_some_and(|backend| backend.is_app_running())
    }
}
