//! Window Handle.
//!
//! `Window` owns one browser-facing window and closes it when dropped.
//! `WindowRef` is a cheap, cloneable reference to the same window that does
//! not keep it open; handlers receive one in [`Event::window`] and should
//! capture one instead of the `Window`. The native window is closed exactly
//! once. After that every operation reports `WindowNotReady` without touching
//! the library.

use std::ffi::CString;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tracing::{debug, warn};
use webinix_common::{BridgeError, Browser, Runtime, WindowId};

use crate::backend::{Backend, RawWindow};
use crate::context::Context;
use crate::dispatch;
use crate::event::{Event, IntoResponse};
use crate::registry::Handler;
use crate::script::{self, ScriptResult};

pub(crate) struct WindowState {
    pub(crate) ctx: Arc<Context>,
    raw: AtomicUsize,
    pub(crate) id: WindowId,
}

impl WindowState {
    pub(crate) fn new(ctx: Arc<Context>, raw: RawWindow, id: WindowId) -> Self {
        Self {
            ctx,
            raw: AtomicUsize::new(raw),
            id,
        }
    }

    /// Native handle, or zero once closed.
    pub(crate) fn raw(&self) -> RawWindow {
        self.raw.load(Ordering::Acquire)
    }

    /// Close the native window if it is still open.
    fn close(&self) -> bool {
        let raw = self.raw.swap(0, Ordering::AcqRel);
        if raw == 0 {
            return false;
        }

        dispatch::unregister_route(raw);
        let removed = self.ctx.registry.clear_window(self.id);
        if let Some(backend) = self.ctx.loaded() {
            backend.close(raw);
        }
        debug!(window_id = %self.id, bindings = removed, "window closed");
        true
    }
}

/// Owning handle. Dropping it closes the window.
pub struct Window {
    state: Arc<WindowState>,
    handle: WindowRef,
}

impl Window {
    pub(crate) fn new(state: Arc<WindowState>) -> Self {
        let handle = WindowRef::from_state(&state);
        Self { state, handle }
    }

    /// A non-owning reference to this window, for use inside handlers.
    pub fn handle(&self) -> WindowRef {
        self.handle.clone()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &Arc<WindowState> {
        &self.state
    }
}

impl Deref for Window {
    type Target = WindowRef;

    fn deref(&self) -> &WindowRef {
        &self.handle
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.state.close();
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.handle.fmt(f)
    }
}

/// Non-owning reference to a window. Operations on a window whose owner is
/// gone report `WindowNotReady`.
#[derive(Clone)]
pub struct WindowRef {
    state: Weak<WindowState>,
    id: WindowId,
}

impl fmt::Debug for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Log a recovered failure and hand it back to the caller.
fn report(err: BridgeError) -> BridgeError {
    warn!("{err}");
    err
}

fn c_text(op: &'static str, text: &str) -> Result<CString, BridgeError> {
    CString::new(text).map_err(|_| report(BridgeError::InvalidText { op }))
}

impl WindowRef {
    pub(crate) fn from_state(state: &Arc<WindowState>) -> Self {
        Self {
            state: Arc::downgrade(state),
            id: state.id,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// `false` once the window has been closed or its owner dropped.
    pub fn is_open(&self) -> bool {
        self.raw() != 0
    }

    /// Native handle, or zero when closed.
    pub(crate) fn raw(&self) -> RawWindow {
        self.state.upgrade().map_or(0, |state| state.raw())
    }

    fn upgrade(&self, op: &'static str) -> Result<Arc<WindowState>, BridgeError> {
        self.state
            .upgrade()
            .filter(|state| state.raw() != 0)
            .ok_or_else(|| report(BridgeError::WindowNotReady { op }))
    }

    /// Check both preconditions of every external call.
    fn ready(
        &self,
        op: &'static str,
    ) -> Result<(Arc<WindowState>, Arc<dyn Backend>, RawWindow), BridgeError> {
        let state = self.upgrade(op)?;
        let raw = state.raw();
        let backend = state
            .ctx
            .loaded()
            .ok_or_else(|| report(BridgeError::LibraryNotLoaded { op }))?;
        Ok((state, backend, raw))
    }

    /// Bind `handler` to `element`. The empty element catches every event of
    /// this window that has no exact binding.
    ///
    /// Binding the same element again replaces the previous handler. The
    /// handler runs on a library thread; its return value is sent back to
    /// the page through [`IntoResponse`].
    pub fn bind<F, R>(&self, element: &str, handler: F) -> Result<(), BridgeError>
    where
        F: Fn(&Event) -> R + Send + Sync + 'static,
        R: IntoResponse,
    {
        let (state, backend, raw) = self.ready("bind")?;
        let c_element = c_text("bind", element)?;

        let handler: Handler = Arc::new(move |event: &Event| handler(event).into_response());
        let replaced = state.ctx.registry.insert(state.id, element, handler);
        if replaced {
            debug!(window_id = %state.id, element, "binding replaced");
        } else {
            backend.bind(raw, &c_element, dispatch::event_trampoline);
            debug!(window_id = %state.id, element, "element bound");
        }
        Ok(())
    }

    /// Show HTML content, a file or a URL. Refreshes the page when the
    /// window is already shown. Returns the library's success flag.
    pub fn show(&self, content: &str) -> Result<bool, BridgeError> {
        let (_, backend, raw) = self.ready("show")?;
        let content = c_text("show", content)?;
        Ok(backend.show(raw, &content))
    }

    /// Same as [`WindowRef::show`] with a specific browser.
    pub fn show_browser(&self, content: &str, browser: Browser) -> Result<bool, BridgeError> {
        let (_, backend, raw) = self.ready("show_browser")?;
        let content = c_text("show_browser", content)?;
        Ok(backend.show_browser(raw, &content, browser.as_raw()))
    }

    /// Run `script` without waiting for its result.
    pub fn run(&self, script: &str) -> Result<bool, BridgeError> {
        let (_, backend, raw) = self.ready("run")?;
        let script = c_text("run", script)?;
        Ok(backend.run(raw, &script))
    }

    /// Run `script` and block up to `timeout` for its result.
    ///
    /// `Duration::ZERO` waits indefinitely. At most `max_response_bytes`
    /// bytes of response are kept. Failures, timeouts included, come back as
    /// a result with `error` set.
    ///
    /// Do not call this from a handler for the same window: the library may
    /// process that window's messages on the thread running the handler.
    pub fn run_script(
        &self,
        script: &str,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> ScriptResult {
        match self.ready("run_script") {
            Ok((_, backend, raw)) => {
                script::execute(backend.as_ref(), raw, script, timeout, max_response_bytes)
            }
            Err(e) => ScriptResult::failure(script, timeout, e.to_string()),
        }
    }

    /// [`WindowRef::run_script`] with the context's default timeout and
    /// buffer size.
    pub fn script(&self, script: &str) -> ScriptResult {
        match self.upgrade("run_script") {
            Ok(state) => {
                let settings = &state.ctx.settings;
                self.run_script(script, settings.script_timeout, settings.max_response_bytes)
            }
            Err(e) => ScriptResult::failure(script, Duration::ZERO, e.to_string()),
        }
    }

    pub fn is_shown(&self) -> Result<bool, BridgeError> {
        let (_, backend, raw) = self.ready("is_shown")?;
        Ok(backend.is_shown(raw))
    }

    pub fn set_runtime(&self, runtime: Runtime) -> Result<(), BridgeError> {
        let (_, backend, raw) = self.ready("set_runtime")?;
        backend.set_runtime(raw, runtime.as_raw());
        Ok(())
    }

    /// Allow the window URL to be opened in more than one browser tab.
    pub fn set_multi_access(&self, status: bool) -> Result<(), BridgeError> {
        let (_, backend, raw) = self.ready("set_multi_access")?;
        backend.set_multi_access(raw, status);
        Ok(())
    }

    pub fn set_kiosk(&self, status: bool) -> Result<(), BridgeError> {
        let (_, backend, raw) = self.ready("set_kiosk")?;
        backend.set_kiosk(raw, status);
        Ok(())
    }

    /// Set the favicon of embedded HTML, e.g. `("<svg>...</svg>", "image/svg+xml")`.
    pub fn set_icon(&self, icon: &str, icon_type: &str) -> Result<(), BridgeError> {
        let (_, backend, raw) = self.ready("set_icon")?;
        let icon = c_text("set_icon", icon)?;
        let icon_type = c_text("set_icon", icon_type)?;
        backend.set_icon(raw, &icon, &icon_type);
        Ok(())
    }

    /// Close the window. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        self.state.upgrade().is_some_and(|state| state.close())
    }
}
