//! Core error types for fitloop-core.
//!
//! Storage and validation failures are recovered at the boundary closest to
//! the operation (store/editor) and surfaced as discrete, user-readable
//! messages. No error ever leaves the playback engine in an inconsistent
//! state: a rejected `play()` leaves it exactly where it was.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fitloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Series storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Draft editing errors
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Playback errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Series store errors.
///
/// Both variants are retryable from the caller's point of view: a failed
/// write leaves the previously persisted collection untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persistence I/O failed (disk full, permission denied). The previous
    /// on-disk collection is unchanged; the in-memory copy the caller holds
    /// is not authoritative until a save succeeds.
    #[error("Storage unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted data could not be parsed into valid series records.
    /// Callers treat the collection as empty and surface a non-fatal warning.
    #[error("Stored series collection is corrupt: {0}")]
    Corrupt(String),
}

/// Draft editor errors.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A reorder request omitted, duplicated, or invented a step id.
    /// The draft is left unchanged.
    #[error("Invalid step reorder: {0}")]
    InvalidReorder(String),

    /// An edit operation was issued with no active draft.
    #[error("No draft is being edited")]
    NoDraft,

    /// Commit or delete could not reach storage.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Playback errors.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// A series with no steps cannot be played. Rejected before any state
    /// transition.
    #[error("Series '{name}' has no steps to play")]
    EmptySeries { name: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
