//! Error types for Segmenta Core

use thiserror::Error;

/// Main error type for Segmenta operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Backend Service communication errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to start backend: {0}")]
    SpawnFailed(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Backend channel closed")]
    ChannelClosed,

    #[error("Request queue is full")]
    QueueFull,

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

/// Settings errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Inline markup errors
#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("Position {position} is outside 0..={len}")]
    OutOfRange { position: usize, len: usize },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
