//! The process-scoped bridge context.
//!
//! `Webinix` owns the lazily loaded library, the binding registry and the
//! bridge settings. Windows keep a reference to it, so several independent
//! contexts can coexist (one per test, for instance).

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::{debug, error};
use webinix_common::{BridgeError, LoadError, WindowId};
use webinix_config::WebinixConfig;

use crate::backend::Backend;
use crate::dispatch;
use crate::loader::{resolve_path, LibrarySearch, NativeLibrary};
use crate::registry::BindingRegistry;
use crate::window::{Window, WindowState};

/// Tunables of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    pub library: LibrarySearch,
    /// Default timeout for `Window::script`. Zero waits indefinitely.
    pub script_timeout: Duration,
    /// Default response buffer size for `Window::script`.
    pub max_response_bytes: usize,
    /// Cache directory, relative to the working directory, removed after
    /// `wait` returns. `None` disables the cleanup.
    pub cache_dir: Option<PathBuf>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            library: LibrarySearch::default(),
            script_timeout: Duration::ZERO,
            max_response_bytes: 8 * 1024,
            cache_dir: Some(PathBuf::from("__intcache__")),
        }
    }
}

impl BridgeSettings {
    pub fn from_config(config: &WebinixConfig) -> Self {
        Self {
            library: LibrarySearch::from_config(&config.library),
            script_timeout: Duration::from_secs(u64::from(config.script.timeout_secs)),
            max_response_bytes: config.script.max_response_bytes,
            cache_dir: config
                .cache
                .cleanup_on_wait
                .then(|| PathBuf::from(&config.cache.dir)),
        }
    }
}

enum LibrarySource {
    Search,
    Injected(Arc<dyn Backend>),
}

type LoadOutcome = Result<(Arc<dyn Backend>, Option<PathBuf>), LoadError>;

pub(crate) struct Context {
    source: LibrarySource,
    loaded: OnceLock<LoadOutcome>,
    pub(crate) registry: BindingRegistry,
    pub(crate) settings: BridgeSettings,
}

impl Context {
    /// The backend, loading it on first use.
    ///
    /// Exactly one load attempt is made per context, even under concurrent
    /// first use; a failure is remembered and returned to every caller.
    pub(crate) fn backend(&self) -> Result<Arc<dyn Backend>, LoadError> {
        match self.loaded.get_or_init(|| self.load()) {
            Ok((backend, _)) => Ok(Arc::clone(backend)),
            Err(e) => Err(e.clone()),
        }
    }

    /// The backend if it is already loaded. Never triggers a load.
    pub(crate) fn loaded(&self) -> Option<Arc<dyn Backend>> {
        match self.loaded.get() {
            Some(Ok((backend, _))) => Some(Arc::clone(backend)),
            _ => None,
        }
    }

    fn load(&self) -> LoadOutcome {
        match &self.source {
            LibrarySource::Injected(backend) => {
                debug!("using injected webinix backend");
                Ok((Arc::clone(backend), None))
            }
            LibrarySource::Search => {
                let path = resolve_path(&self.settings.library)?;
                match NativeLibrary::load(&path) {
                    Ok(native) => Ok((Arc::new(native) as Arc<dyn Backend>, Some(path))),
                    Err(e) => {
                        error!("{e}");
                        Err(e)
                    }
                }
            }
        }
    }
}

/// Entry point of the bridge.
///
/// Cheap to clone; clones share the same library and registry.
#[derive(Clone)]
pub struct Webinix {
    pub(crate) inner: Arc<Context>,
}

impl Webinix {
    /// A context that loads the native library from the configured search
    /// path on first use.
    pub fn new(settings: BridgeSettings) -> Self {
        Self::with_source(LibrarySource::Search, settings)
    }

    pub fn from_config(config: &WebinixConfig) -> Self {
        Self::new(BridgeSettings::from_config(config))
    }

    /// A context driving `backend` instead of the native library.
    pub fn with_backend(backend: Arc<dyn Backend>, settings: BridgeSettings) -> Self {
        Self::with_source(LibrarySource::Injected(backend), settings)
    }

    fn with_source(source: LibrarySource, settings: BridgeSettings) -> Self {
        Self {
            inner: Arc::new(Context {
                source,
                loaded: OnceLock::new(),
                registry: BindingRegistry::new(),
                settings,
            }),
        }
    }

    /// Load the library now. Idempotent.
    pub fn load(&self) -> Result<(), LoadError> {
        self.inner.backend().map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.loaded().is_some()
    }

    /// Path the native library was loaded from, once loaded.
    pub fn library_path(&self) -> Option<PathBuf> {
        match self.inner.loaded.get() {
            Some(Ok((_, path))) => path.clone(),
            _ => None,
        }
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.inner.settings
    }

    /// Create a window. Loads the library if needed.
    pub fn new_window(&self) -> Result<Window, BridgeError> {
        let backend = self.inner.backend()?;

        let raw = backend.new_window();
        if raw == 0 {
            let err = BridgeError::WindowNotReady { op: "new_window" };
            error!("{err}");
            return Err(err);
        }
        let id = WindowId(backend.window_id(raw));

        let state = Arc::new(WindowState::new(Arc::clone(&self.inner), raw, id));
        dispatch::register_route(raw, Arc::downgrade(&state));

        debug!(window_id = %id, "window created");
        Ok(Window::new(state))
    }

    /// Total number of bindings across all windows of this context.
    pub fn binding_count(&self) -> usize {
        self.inner.registry.len()
    }
}
