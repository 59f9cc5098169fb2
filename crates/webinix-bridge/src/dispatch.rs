//! Event Dispatcher.
//!
//! The library calls [`event_trampoline`] on its own threads whenever the
//! page reports an event. The trampoline finds the window the event belongs
//! to, resolves its handler, runs it, and hands a returned value back to the
//! library with the event's correlation number. Nothing unwinds out of the
//! trampoline: handler panics and errors are logged and treated as "no
//! response".

use std::collections::HashMap;
use std::ffi::{c_char, c_uint, CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

use tracing::{debug, error, warn};
use webinix_common::{BridgeError, EventType};

use crate::backend::RawWindow;
use crate::event::Event;
use crate::window::{WindowRef, WindowState};

/// How a dispatch ended. Returned for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
    /// The handler ran and its value was sent to the library.
    Responded,
    /// The handler ran and returned nothing.
    NoResponse,
    /// Neither an exact nor a wildcard binding exists.
    NoCallback,
    /// The window is unknown or was closed before the handler could act.
    WindowClosed,
    /// The handler panicked.
    HandlerPanicked,
}

// The C callback carries no user data, so the native handle is the only way
// back to the owning context.
type Routes = RwLock<HashMap<RawWindow, Weak<WindowState>>>;

fn routes() -> &'static Routes {
    static ROUTES: OnceLock<Routes> = OnceLock::new();
    ROUTES.get_or_init(|| RwLock::new(HashMap::new()))
}

pub(crate) fn register_route(raw: RawWindow, state: Weak<WindowState>) {
    routes()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(raw, state);
}

pub(crate) fn unregister_route(raw: RawWindow) {
    routes()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&raw);
}

fn lookup_route(raw: RawWindow) -> Option<Arc<WindowState>> {
    let weak = routes()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&raw)
        .cloned()?;
    weak.upgrade()
}

/// Read a C string from the library. Null becomes empty; invalid UTF-8 is
/// replaced.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn decode_text(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Callback registered with `webinix_interface_bind` for every binding.
///
/// # Safety
/// Called by the library with `element` and `data` either null or valid
/// NUL-terminated strings.
pub unsafe extern "C" fn event_trampoline(
    window: RawWindow,
    event_type: c_uint,
    element: *const c_char,
    data: *const c_char,
    event_number: c_uint,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: guaranteed by the library's callback contract.
        let (element, data) = unsafe { (decode_text(element), decode_text(data)) };

        match lookup_route(window) {
            Some(state) => dispatch(&state, event_type, element, data, event_number),
            None => {
                warn!(element = %element, "webinix dispatch(): event for unknown window");
                DispatchOutcome::WindowClosed
            }
        }
    }));

    if outcome.is_err() {
        error!("webinix dispatch(): panic while dispatching event");
    }
}

/// Resolve and run the handler for one event.
pub(crate) fn dispatch(
    state: &Arc<WindowState>,
    event_type: u32,
    element: String,
    data: String,
    event_number: u32,
) -> DispatchOutcome {
    if state.raw() == 0 {
        debug!(window_id = %state.id, "event for closed window dropped");
        return DispatchOutcome::WindowClosed;
    }

    let Some(handler) = state.ctx.registry.resolve(state.id, &element) else {
        warn!("{}", BridgeError::NoCallbackBound { element });
        return DispatchOutcome::NoCallback;
    };

    let event = Event {
        window: WindowRef::from_state(state),
        event_type: EventType::from_raw(event_type),
        element,
        data,
        event_number,
    };
    debug!(
        window_id = %state.id,
        element = %event.element,
        event_type = ?event.event_type,
        event_number,
        "dispatching event"
    );

    let response = match panic::catch_unwind(AssertUnwindSafe(|| handler(&event))) {
        Ok(response) => response,
        Err(_) => {
            error!(element = %event.element, "webinix dispatch(): handler panicked");
            return DispatchOutcome::HandlerPanicked;
        }
    };

    match response {
        Some(text) => send_response(state, event_number, &text),
        None => DispatchOutcome::NoResponse,
    }
}

fn send_response(state: &WindowState, event_number: u32, text: &str) -> DispatchOutcome {
    let raw = state.raw();
    if raw == 0 {
        debug!(window_id = %state.id, "window closed before response, dropping it");
        return DispatchOutcome::WindowClosed;
    }
    let Some(backend) = state.ctx.loaded() else {
        warn!("{}", BridgeError::LibraryNotLoaded { op: "set_response" });
        return DispatchOutcome::NoResponse;
    };
    // Truncated at the first NUL so the waiting page call is always answered.
    let text = match text.find('\0') {
        Some(nul) => {
            warn!("{}, truncating", BridgeError::InvalidText { op: "set_response" });
            &text[..nul]
        }
        None => text,
    };
    let Ok(response) = CString::new(text) else {
        return DispatchOutcome::NoResponse;
    };

    backend.set_response(raw, event_number, &response);
    DispatchOutcome::Responded
}
