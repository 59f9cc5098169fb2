//! Native side of the webinix call bridge.
//!
//! Loads the prebuilt webinix library at runtime and exposes:
//! - `Webinix`: the process context owning the library and bindings
//! - `Window`: show content, bind elements, run scripts
//! - Event dispatch from library threads to Rust handlers
//! - `wait`/`exit` and cache cleanup
//!
//! ```no_run
//! use webinix_bridge::{BridgeSettings, Webinix};
//!
//! let webinix = Webinix::new(BridgeSettings::default());
//! let window = webinix.new_window()?;
//! window.bind("Greet", |event| format!("hello {}", event.data))?;
//! window.show("<html><script src=\"webinix.js\"></script>...</html>")?;
//! webinix.wait()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
mod context;
mod dispatch;
pub mod event;
pub mod js;
mod lifecycle;
pub mod loader;
pub mod registry;
pub mod script;
mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, EventCallback, RawWindow};
pub use context::{BridgeSettings, Webinix};
pub use dispatch::event_trampoline;
pub use event::{Event, IntoResponse};
pub use loader::{default_library_name, resolve_path, LibrarySearch, NativeLibrary};
pub use registry::WILDCARD;
pub use script::ScriptResult;
pub use window::{Window, WindowRef};

pub use webinix_common::{BridgeError, Browser, EventType, LoadError, Runtime, WindowId};
