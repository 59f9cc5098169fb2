//! Script Execution Bridge.
//!
//! Runs JavaScript in a window and blocks for the result. Every call gets a
//! fresh zeroed buffer, so responses never leak between calls.

use std::ffi::CString;
use std::time::Duration;

use tracing::{debug, warn};
use webinix_common::BridgeError;

use crate::backend::{Backend, RawWindow};

/// Outcome of [`crate::Window::run_script`].
///
/// On failure `data` carries whatever diagnostic text is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResult {
    pub error: bool,
    pub data: String,
    /// The script that was run.
    pub script: String,
    /// The timeout it ran with.
    pub timeout: Duration,
}

impl ScriptResult {
    pub(crate) fn failure(script: &str, timeout: Duration, reason: String) -> Self {
        Self {
            error: true,
            data: reason,
            script: script.to_string(),
            timeout,
        }
    }

    pub fn is_ok(&self) -> bool {
        !self.error
    }
}

/// Whole seconds handed to the library. Fractions round up so a short
/// non-zero timeout never turns into "wait forever".
fn timeout_secs(timeout: Duration) -> u32 {
    let mut secs = timeout.as_secs();
    if timeout.subsec_nanos() > 0 {
        secs = secs.saturating_add(1);
    }
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// Text up to the first NUL, or the whole buffer if the library filled it.
///
/// Invalid UTF-8 is dropped rather than replaced, so the text never grows
/// past the buffer. A multibyte character cut off at the end is dropped too.
fn decode_buffer(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|b| *b == 0).unwrap_or(buffer.len());
    let mut bytes = &buffer[..end];
    let mut text = String::with_capacity(bytes.len());

    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => break,
                }
            }
        }
    }

    if text.len() < end {
        debug!(dropped = end - text.len(), "invalid UTF-8 dropped from script response");
    }
    text
}

pub(crate) fn execute(
    backend: &dyn Backend,
    raw: RawWindow,
    script: &str,
    timeout: Duration,
    max_response_bytes: usize,
) -> ScriptResult {
    if max_response_bytes == 0 {
        let reason = "webinix run_script(): response buffer size must be positive".to_string();
        warn!("{reason}");
        return ScriptResult::failure(script, timeout, reason);
    }
    let Ok(c_script) = CString::new(script) else {
        let err = BridgeError::InvalidText { op: "run_script" };
        warn!("{err}");
        return ScriptResult::failure(script, timeout, err.to_string());
    };

    let mut buffer = vec![0u8; max_response_bytes];
    let ok = backend.script(raw, &c_script, timeout_secs(timeout), &mut buffer);
    let data = decode_buffer(&buffer);

    if ok {
        debug!(bytes = data.len(), "script completed");
    } else {
        warn!(timeout_secs = timeout.as_secs(), "webinix run_script(): script failed: {data}");
    }

    ScriptResult {
        error: !ok,
        data,
        script: script.to_string(),
        timeout,
    }
}
