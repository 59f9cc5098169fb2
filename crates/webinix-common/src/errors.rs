use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config I/O error at {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    #[error("no platform config directory; pass a config path explicitly")]
    NoConfigDir,
}

/// Failure to locate or open the native webinix library.
///
/// Fatal for every operation that needs the library. The error is cloneable
/// so the outcome of the single load attempt can be reported to every caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("webinix load(): failed to open {}: {reason}", path.display())]
    LibraryOpen { path: PathBuf, reason: String },

    #[error("webinix load(): missing symbol `{symbol}`: {reason}")]
    MissingSymbol { symbol: String, reason: String },

    #[error("webinix load(): unsupported platform")]
    Unsupported,
}

/// Recoverable failures of the call/event bridge.
///
/// Messages follow `webinix <operation>(): <reason>` so they stay greppable
/// in logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("webinix {op}(): window is not ready")]
    WindowNotReady { op: &'static str },

    #[error("webinix {op}(): library not loaded")]
    LibraryNotLoaded { op: &'static str },

    #[error("webinix dispatch(): no callback bound for element `{element}`")]
    NoCallbackBound { element: String },

    #[error("webinix {op}(): text contains an interior NUL byte")]
    InvalidText { op: &'static str },

    #[error(transparent)]
    Load(#[from] LoadError),
}


#[derive(Debug, thiserror::Error)]
pub enum WebinixError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("{0}")]
    Other(String),
}
