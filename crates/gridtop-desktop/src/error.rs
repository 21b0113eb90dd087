//! Error types for the fallible boundaries of the desktop engine
//!
//! Placement and navigation never fail: inconsistent layouts are settled
//! silently and exhausted navigation is a no-op. Errors only surface from
//! configuration parsing, snapshot decoding and the persistence provider.

/// Errors raised by configuration, snapshot and persistence code.
#[derive(Debug, thiserror::Error)]
pub enum DesktopError {
    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, DesktopError>;
