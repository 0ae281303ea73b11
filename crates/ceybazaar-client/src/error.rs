//! Transport and facade error types.

use thiserror::Error;

/// Errors surfaced by the transport client and the service facades.
///
/// A valid envelope with a non-success code is *not* an error; it is returned
/// to the caller as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not authenticated: the session was rejected by the backend")]
    Unauthenticated,

    #[error("Malformed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Session(#[from] ceybazaar_core::Error),
}

impl ApiError {
    /// Whether the failure means the user has to log in again.
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
