//! The seam between the bridge and the native webinix library.
//!
//! Every external entry point the bridge uses is a method here. The native
//! implementation lives in [`crate::loader::NativeLibrary`]; tests inject an
//! in-process fake.

use std::ffi::{c_char, c_uint, CStr};

/// Opaque native window handle as issued by `webinix_new_window`.
/// Zero means "no window".
pub type RawWindow = usize;

/// Callback signature expected by `webinix_interface_bind`:
/// `(window, event_type, element, data, event_number)`.
pub type EventCallback =
    unsafe extern "C" fn(RawWindow, c_uint, *const c_char, *const c_char, c_uint);

/// Raw entry points of the webinix library.
///
/// Implementations must be callable from any thread. Text arguments are
/// NUL-terminated; the caller keeps them alive for the duration of the call.
pub trait Backend: Send + Sync {
    fn new_window(&self) -> RawWindow;

    /// Small unique number the library assigned to `window`.
    fn window_id(&self, window: RawWindow) -> u32;

    fn show(&self, window: RawWindow, content: &CStr) -> bool;

    fn show_browser(&self, window: RawWindow, content: &CStr, browser: u32) -> bool;

    fn close(&self, window: RawWindow);

    fn is_shown(&self, window: RawWindow) -> bool;

    /// Register `callback` for `element` (empty = every element).
    fn bind(&self, window: RawWindow, element: &CStr, callback: EventCallback) -> u32;

    /// Answer the browser-side call identified by `event_number`.
    fn set_response(&self, window: RawWindow, event_number: u32, response: &CStr);

    /// Run `script` and copy the NUL-terminated response into `buffer`.
    ///
    /// The library may write at most `buffer.len()` bytes. Returns `true` on
    /// success, `false` on script error or timeout.
    fn script(
        &self,
        window: RawWindow,
        script: &CStr,
        timeout_secs: u32,
        buffer: &mut [u8],
    ) -> bool;

    /// Run `script` without waiting for a response.
    fn run(&self, window: RawWindow, script: &CStr) -> bool;

    fn set_runtime(&self, window: RawWindow, runtime: u32);

    fn set_multi_access(&self, window: RawWindow, status: bool);

    fn set_kiosk(&self, window: RawWindow, status: bool);

    fn set_icon(&self, window: RawWindow, icon: &CStr, icon_type: &CStr);

    /// Close every window and unblock `wait`.
    fn exit(&self);

    /// Block until no window is open or `exit` was called.
    fn wait(&self);

    fn set_timeout(&self, seconds: u32);

    fn is_app_running(&self) -> bool;
}
