//! Error types for the Trello client.
//!
//! # Design
//! A 404 on a read never shows up here: the dispatcher turns it into an empty
//! result. 401 gets a dedicated variant because the caller is expected to
//! re-authenticate, while every other unexpected status lands in `Request`
//! with the raw status and body for debugging. No variant is ever retried.

use std::path::PathBuf;

/// Errors returned by `TrelloClient` and everything layered on it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 401; the token is missing, expired or revoked.
    #[error("authentication failed: {body}")]
    Authentication { body: String },

    /// The server returned a non-200 status other than 401 or a 404 on a read.
    #[error("request failed with HTTP {status}: {body}")]
    Request { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A JSON request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The HTTP backend failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The file behind a file-path attachment could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The background task running an async request did not complete.
    #[error("async request task failed: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
