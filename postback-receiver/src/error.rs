//! Error types.

use thiserror::Error;

/// Startup configuration errors.
///
/// These are fatal: the server refuses to start rather than verify
/// checksums against an empty secret.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    Missing(&'static str),

    #[error("invalid value for env var {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Per-request postback errors.
#[derive(Debug, Error)]
pub enum PostbackError {
    /// The body could not be read, e.g. it exceeds the size limit.
    #[error("unreadable postback body: {0}")]
    UnreadableBody(String),

    /// The body is not a JSON object of the postback shape.
    #[error("malformed postback body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
