pub mod errors;
pub mod types;

pub use errors::{BridgeError, ConfigError, LoadError, WebinixError};
pub use types::{Browser, EventType, Runtime, WindowId};

pub type Result<T> = std::result::Result<T, WebinixError>;
