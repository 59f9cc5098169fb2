//! Element Binding Registry.
//!
//! Maps `(window, element)` to a native handler. The empty element is the
//! wildcard for its window and is consulted only when no exact binding
//! exists. Written by `bind` and window teardown, read by every dispatch.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use webinix_common::WindowId;

use crate::event::Event;

/// Element key that matches every element of a window.
pub const WILDCARD: &str = "";

/// Type-erased handler stored in the registry.
pub type Handler = Arc<dyn Fn(&Event) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BindingKey {
    window: WindowId,
    element: String,
}

impl BindingKey {
    fn new(window: WindowId, element: &str) -> Self {
        Self {
            window,
            element: element.to_string(),
        }
    }
}

#[derive(Default)]
pub struct BindingRegistry {
    bindings: RwLock<HashMap<BindingKey, Handler>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `element` on `window`.
    ///
    /// Returns `true` when an earlier handler for the same key was replaced.
    pub fn insert(&self, window: WindowId, element: &str, handler: Handler) -> bool {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        bindings
            .insert(BindingKey::new(window, element), handler)
            .is_some()
    }

    /// Find the handler for `element`: exact match first, then the window's
    /// wildcard.
    pub fn resolve(&self, window: WindowId, element: &str) -> Option<Handler> {
        let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
        bindings
            .get(&BindingKey::new(window, element))
            .or_else(|| bindings.get(&BindingKey::new(window, WILDCARD)))
            .cloned()
    }

    /// Drop every binding of `window`. Returns how many were removed.
    pub fn clear_window(&self, window: WindowId) -> usize {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        let before = bindings.len();
        bindings.retain(|key, _| key.window != window);
        before - bindings.len()
    }

    /// Number of bindings for `window`.
    pub fn count(&self, window: WindowId) -> usize {
        let bindings = self.bindings.read().unwrap_or_else(PoisonError::into_inner);
        bindings.keys().filter(|key| key.window == window).count()
    }

    pub fn len(&self) -> usize {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
