//! Library Loader: find and open the webinix shared library.

mod native;
mod path;

pub use native::NativeLibrary;
pub use path::{default_library_name, resolve_path, LibrarySearch};
