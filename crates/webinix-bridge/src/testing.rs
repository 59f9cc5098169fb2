//! In-process stand-in for the native library.
//!
//! `FakeBackend` records every call as a short key (`"show"`,
//! `"show_browser:2"`, `"script:3"`, ...) and drives events through the real
//! `extern "C"` trampoline, so tests exercise the same path as the library.

use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use webinix_common::WindowId;

use crate::backend::{Backend, EventCallback, RawWindow};
use crate::window::WindowRef;

// Handles are process-unique so routes of parallel tests never collide.
static NEXT_RAW: AtomicUsize = AtomicUsize::new(0x1000);

/// How the fake answers `script` calls.
#[derive(Debug, Clone)]
pub(crate) enum ScriptReply {
    Respond(String),
    Fail(String),
    /// Never answers; returns failure once the timeout elapses.
    Hang,
}

impl Default for ScriptReply {
    fn default() -> Self {
        Self::Respond(String::new())
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<String>,
    next_id: u32,
    fail_new_window: bool,
    ids: HashMap<RawWindow, WindowId>,
    open: HashSet<RawWindow>,
    shown: HashMap<RawWindow, String>,
    callbacks: HashMap<(RawWindow, String), EventCallback>,
    responses: Vec<(WindowId, u32, String)>,
    script_reply: ScriptReply,
    dirty_buffers: usize,
    exited: bool,
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
    changed: Condvar,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: String) -> MutexGuard<'_, FakeState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }

    /// Make `new_window` return the null handle.
    pub(crate) fn fail_new_window(&self, fail: bool) {
        self.lock().fail_new_window = fail;
    }

    pub(crate) fn script_reply(&self, reply: ScriptReply) {
        self.lock().script_reply = reply;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Calls recorded as `key` or `key:<arg>`.
    pub(crate) fn call_count(&self, key: &str) -> usize {
        let prefix = format!("{key}:");
        self.lock()
            .calls
            .iter()
            .filter(|call| *call == key || call.starts_with(&prefix))
            .count()
    }

    pub(crate) fn last_shown(&self, raw: RawWindow) -> Option<String> {
        self.lock().shown.get(&raw).cloned()
    }

    pub(crate) fn responses(&self) -> Vec<(WindowId, u32, String)> {
        self.lock().responses.clone()
    }

    /// `(event_number, response)` pairs sent for `window`.
    pub(crate) fn responses_for(&self, window: &WindowRef) -> Vec<(u32, String)> {
        self.lock()
            .responses
            .iter()
            .filter(|(id, _, _)| *id == window.id())
            .map(|(_, number, text)| (*number, text.clone()))
            .collect()
    }

    /// Script calls that received a buffer with leftover bytes.
    pub(crate) fn dirty_buffers(&self) -> usize {
        self.lock().dirty_buffers
    }

    /// Deliver an event the way the library does: through the callback
    /// registered for the element, or the window's wildcard callback.
    /// Returns `false` when no callback applies.
    pub(crate) fn fire(
        &self,
        window: &WindowRef,
        event_type: u32,
        element: &str,
        data: &str,
        event_number: u32,
    ) -> bool {
        let raw = window.raw();
        if raw == 0 {
            return false;
        }
        let callback = {
            let state = self.lock();
            state
                .callbacks
                .get(&(raw, element.to_string()))
                .or_else(|| state.callbacks.get(&(raw, String::new())))
                .copied()
        };
        let Some(callback) = callback else {
            return false;
        };

        let element = CString::new(element).expect("element without NUL");
        let data = CString::new(data).expect("data without NUL");
        // SAFETY: both strings outlive the call.
        unsafe { callback(raw, event_type, element.as_ptr(), data.as_ptr(), event_number) };
        true
    }
}

fn write_text(buffer: &mut [u8], text: &str) {
    let n = text.len().min(buffer.len().saturating_sub(1));
    buffer[..n].copy_from_slice(&text.as_bytes()[..n]);
    if let Some(end) = buffer.get_mut(n) {
        *end = 0;
    }
}

impl Backend for FakeBackend {
    fn new_window(&self) -> RawWindow {
        let mut state = self.record("new_window".into());
        if state.fail_new_window {
            return 0;
        }
        let raw = NEXT_RAW.fetch_add(0x10, Ordering::Relaxed);
        state.next_id += 1;
        let id = WindowId(state.next_id);
        state.ids.insert(raw, id);
        state.open.insert(raw);
        raw
    }

    fn window_id(&self, window: RawWindow) -> u32 {
        self.lock().ids.get(&window).map_or(0, |id| id.0)
    }

    fn show(&self, window: RawWindow, content: &CStr) -> bool {
        let mut state = self.record("show".into());
        state
            .shown
            .insert(window, content.to_string_lossy().into_owned());
        true
    }

    fn show_browser(&self, window: RawWindow, content: &CStr, browser: u32) -> bool {
        let mut state = self.record(format!("show_browser:{browser}"));
        state
            .shown
            .insert(window, content.to_string_lossy().into_owned());
        true
    }

    fn close(&self, window: RawWindow) {
        let mut state = self.record("close".into());
        state.open.remove(&window);
        state.callbacks.retain(|(raw, _), _| *raw != window);
        drop(state);
        self.changed.notify_all();
    }

    fn is_shown(&self, window: RawWindow) -> bool {
        self.record("is_shown".into()).shown.contains_key(&window)
    }

    fn bind(&self, window: RawWindow, element: &CStr, callback: EventCallback) -> u32 {
        let mut state = self.record("bind".into());
        let element = element.to_string_lossy().into_owned();
        state.callbacks.insert((window, element), callback);
        state.callbacks.len() as u32
    }

    fn set_response(&self, window: RawWindow, event_number: u32, response: &CStr) {
        let mut state = self.record("set_response".into());
        let id = state.ids.get(&window).copied().unwrap_or(WindowId(0));
        state
            .responses
            .push((id, event_number, response.to_string_lossy().into_owned()));
    }

    fn script(
        &self,
        _window: RawWindow,
        _script: &CStr,
        timeout_secs: u32,
        buffer: &mut [u8],
    ) -> bool {
        let reply = {
            let mut state = self.record(format!("script:{timeout_secs}"));
            if buffer.iter().any(|b| *b != 0) {
                state.dirty_buffers += 1;
            }
            state.script_reply.clone()
        };

        match reply {
            ScriptReply::Respond(text) => {
                write_text(buffer, &text);
                true
            }
            ScriptReply::Fail(text) => {
                write_text(buffer, &text);
                false
            }
            ScriptReply::Hang => {
                let secs = if timeout_secs == 0 { 2 } else { timeout_secs };
                std::thread::sleep(Duration::from_secs(u64::from(secs)));
                false
            }
        }
    }

    fn run(&self, _window: RawWindow, _script: &CStr) -> bool {
        self.record("run".into());
        true
    }

    fn set_runtime(&self, _window: RawWindow, runtime: u32) {
        self.record(format!("set_runtime:{runtime}"));
    }

    fn set_multi_access(&self, _window: RawWindow, status: bool) {
        self.record(format!("set_multi_access:{status}"));
    }

    fn set_kiosk(&self, _window: RawWindow, status: bool) {
        self.record(format!("set_kiosk:{status}"));
    }

    fn set_icon(&self, _window: RawWindow, _icon: &CStr, _icon_type: &CStr) {
        self.record("set_icon".into());
    }

    fn exit(&self) {
        let mut state = self.record("exit".into());
        state.exited = true;
        state.open.clear();
        drop(state);
        self.changed.notify_all();
    }

    fn wait(&self) {
        let mut state = self.record("wait".into());
        while !state.exited && !state.open.is_empty() {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn set_timeout(&self, seconds: u32) {
        self.record(format!("set_timeout:{seconds}"));
    }

    fn is_app_running(&self) -> bool {
        let state = self.record("is_app_running".into());
        !state.exited && !state.open.is_empty()
    }
}
