//! `libloading`-backed implementation of [`Backend`].

use std::ffi::{c_char, c_uint, CStr};
use std::path::Path;

use libloading::{Library, Symbol};
use tracing::info;
use webinix_common::LoadError;

use crate::backend::{Backend, EventCallback, RawWindow};

type NewWindowFn = unsafe extern "C" fn() -> RawWindow;
type WindowIdFn = unsafe extern "C" fn(RawWindow) -> c_uint;
type ShowFn = unsafe extern "C" fn(RawWindow, *const c_char) -> bool;
type ShowBrowserFn = unsafe extern "C" fn(RawWindow, *const c_char, c_uint) -> bool;
type WindowFn = unsafe extern "C" fn(RawWindow);
type WindowQueryFn = unsafe extern "C" fn(RawWindow) -> bool;
type BindFn = unsafe extern "C" fn(RawWindow, *const c_char, EventCallback) -> c_uint;
type SetResponseFn = unsafe extern "C" fn(RawWindow, c_uint, *const c_char);
type ScriptFn = unsafe extern "C" fn(RawWindow, *const c_char, c_uint, *mut c_char, usize) -> bool;
type RunFn = unsafe extern "C" fn(RawWindow, *const c_char) -> bool;
type WindowUintFn = unsafe extern "C" fn(RawWindow, c_uint);
type WindowBoolFn = unsafe extern "C" fn(RawWindow, bool);
type SetIconFn = unsafe extern "C" fn(RawWindow, *const c_char, *const c_char);
type GlobalFn = unsafe extern "C" fn();
type SetTimeoutFn = unsafe extern "C" fn(c_uint);
type GlobalQueryFn = unsafe extern "C" fn() -> bool;

/// The opened webinix library with every entry point resolved.
pub struct NativeLibrary {
    // Keeps the module mapped for as long as the function pointers live.
    _lib: Library,
    new_window: NewWindowFn,
    window_id: WindowIdFn,
    show: ShowFn,
    show_browser: ShowBrowserFn,
    close: WindowFn,
    is_shown: WindowQueryFn,
    bind: BindFn,
    set_response: SetResponseFn,
    script: ScriptFn,
    run: RunFn,
    set_runtime: WindowUintFn,
    set_multi_access: WindowBoolFn,
    set_kiosk: WindowBoolFn,
    set_icon: SetIconFn,
    exit: GlobalFn,
    wait: GlobalFn,
    set_timeout: SetTimeoutFn,
    is_app_running: GlobalQueryFn,
}

/// Resolve one symbol and copy the function pointer out of it.
///
/// # Safety
/// `T` must match the exported function's real signature.
unsafe fn symbol<T: Copy>(lib: &Library, name: &str) -> Result<T, LoadError> {
    let sym: Symbol<T> = lib
        .get(name.as_bytes())
        .map_err(|e| LoadError::MissingSymbol {
            symbol: name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(*sym)
}

impl NativeLibrary {
    /// Open the library at `path` and resolve its entry points.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        // SAFETY: loading runs the library's initializers; webinix has none
        // with preconditions on the host process.
        let lib = unsafe { Library::new(path) }.map_err(|e| LoadError::LibraryOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // SAFETY: the signatures below mirror webinix.h.
        let native = unsafe {
            Self {
                new_window: symbol(&lib, "webinix_new_window")?,
                window_id: symbol(&lib, "webinix_interface_get_window_id")?,
                show: symbol(&lib, "webinix_show")?,
                show_browser: symbol(&lib, "webinix_show_browser")?,
                close: symbol(&lib, "webinix_close")?,
                is_shown: symbol(&lib, "webinix_is_shown")?,
                bind: symbol(&lib, "webinix_interface_bind")?,
                set_response: symbol(&lib, "webinix_interface_set_response")?,
                script: symbol(&lib, "webinix_script")?,
                run: symbol(&lib, "webinix_run")?,
                set_runtime: symbol(&lib, "webinix_set_runtime")?,
                set_multi_access: symbol(&lib, "webinix_set_multi_access")?,
                set_kiosk: symbol(&lib, "webinix_set_kiosk")?,
                set_icon: symbol(&lib, "webinix_set_icon")?,
                exit: symbol(&lib, "webinix_exit")?,
                wait: symbol(&lib, "webinix_wait")?,
                set_timeout: symbol(&lib, "webinix_set_timeout")?,
                is_app_running: symbol(&lib, "webinix_interface_is_app_running")?,
                _lib: lib,
            }
        };

        info!(path = %path.display(), "webinix library loaded");
        Ok(native)
    }
}

// SAFETY (all methods): the function pointers come from the library kept
// alive in `_lib`, and every pointer argument outlives the call.
impl Backend for NativeLibrary {
    fn new_window(&self) -> RawWindow {
        unsafe { (self.new_window)() }
    }

    fn window_id(&self, window: RawWindow) -> u32 {
        unsafe { (self.window_id)(window) }
    }

    fn show(&self, window: RawWindow, content: &CStr) -> bool {
        unsafe { (self.show)(window, content.as_ptr()) }
    }

    fn show_browser(&self, window: RawWindow, content: &CStr, browser: u32) -> bool {
        unsafe { (self.show_browser)(window, content.as_ptr(), browser) }
    }

    fn close(&self, window: RawWindow) {
        unsafe { (self.close)(window) }
    }

    fn is_shown(&self, window: RawWindow) -> bool {
        unsafe { (self.is_shown)(window) }
    }

    fn bind(&self, window: RawWindow, element: &CStr, callback: EventCallback) -> u32 {
        unsafe { (self.bind)(window, element.as_ptr(), callback) }
    }

    fn set_response(&self, window: RawWindow, event_number: u32, response: &CStr) {
        unsafe { (self.set_response)(window, event_number, response.as_ptr()) }
    }

    fn script(
        &self,
        window: RawWindow,
        script: &CStr,
        timeout_secs: u32,
        buffer: &mut [u8],
    ) -> bool {
        unsafe {
            (self.script)(
                window,
                script.as_ptr(),
                timeout_secs,
                buffer.as_mut_ptr().cast::<c_char>(),
                buffer.len(),
            )
        }
    }

    fn run(&self, window: RawWindow, script: &CStr) -> bool {
        unsafe { (self.run)(window, script.as_ptr()) }
    }

    fn set_runtime(&self, window: RawWindow, runtime: u32) {
        unsafe { (self.set_runtime)(window, runtime) }
    }

    fn set_multi_access(&self, window: RawWindow, status: bool) {
        unsafe { (self.set_multi_access)(window, status) }
    }

    fn set_kiosk(&self, window: RawWindow, status: bool) {
        unsafe { (self.set_kiosk)(window, status) }
    }

    fn set_icon(&self, window: RawWindow, icon: &CStr, icon_type: &CStr) {
        unsafe { (self.set_icon)(window, icon.as_ptr(), icon_type.as_ptr()) }
    }

    fn exit(&self) {
        unsafe { (self.exit)() }
    }

    fn wait(&self) {
        unsafe { (self.wait)() }
    }

    fn set_timeout(&self, seconds: u32) {
        unsafe { (self.set_timeout)(seconds) }
    }

    fn is_app_running(&self) -> bool {
        unsafe { (self.is_app_running)() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_library_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webinix-2-x64.so");

        match NativeLibrary::load(&path) {
            Err(LoadError::LibraryOpen { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("loading a missing file must fail"),
        }
    }

    #[test]
    fn garbage_file_reports_library_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webinix-2-x64.so");
        std::fs::write(&path, b"not a shared object").unwrap();

        let err = NativeLibrary::load(&path).err().unwrap();
        assert!(matches!(err, LoadError::LibraryOpen { .. }));
        assert!(err.to_string().starts_with("webinix load(): failed to open"));
    }
}
