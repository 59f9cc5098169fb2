//! Event records and handler return values.

use std::fmt;

use serde::de::DeserializeOwned;
use webinix_common::EventType;

use crate::window::WindowRef;

/// One user interaction reported by the browser.
///
/// Built fresh for every dispatch and handed to the handler by reference.
#[derive(Debug, Clone)]
pub struct Event {
    /// Window the event originated from.
    pub window: WindowRef,
    pub event_type: EventType,
    /// Element identifier as sent by the page.
    pub element: String,
    /// Payload sent with the event; empty when the page sent none.
    pub data: String,
    /// Correlation number used to route a response back to the caller.
    pub event_number: u32,
}

impl Event {
    /// Parse the payload as JSON.
    pub fn json_data<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.data)
    }
}

/// Conversion of a handler's return value into the text sent back to the
/// page. `None` means "no response".
pub trait IntoResponse {
    fn into_response(self) -> Option<String>;
}

impl IntoResponse for () {
    fn into_response(self) -> Option<String> {
        None
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Option<String> {
        Some(self)
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoResponse for bool {
    fn into_response(self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! numeric_response {
    ($($ty:ty),*) => {
        $(
            impl IntoResponse for $ty {
                fn into_response(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

numeric_response!(i32, i64, u32, u64, usize, f64);

impl IntoResponse for serde_json::Value {
    fn into_response(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: IntoResponse> IntoResponse for Option<T> {
    fn into_response(self) -> Option<String> {
        self.and_then(IntoResponse::into_response)
    }
}

/// A failed handler sends no response; the error is logged.
impl<T: IntoResponse, E: fmt::Display> IntoResponse for Result<T, E> {
    fn into_response(self) -> Option<String> {
        match self {
            Ok(value) => value.into_response(),
            Err(e) => {
                tracing::warn!("webinix dispatch(): handler failed: {e}");
                None
            }
        }
    }
}
