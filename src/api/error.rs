//! Error types for the REST and feed clients.

use thiserror::Error;

use super::ErrorBody;
use crate::token::TokenStoreError;

/// Failures a request can end in. The `Display` text is what the user sees in
/// the `Error` envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure: timeout, refused connection, DNS.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` comes from the server payload when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, bad MIME type).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An authenticated operation was attempted without a stored token.
    #[error("Not logged in")]
    Unauthenticated,

    /// Local write-back (token persistence) failed.
    #[error("Local storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Error for a non-2xx `status`, preferring the payload's message over the
    /// status reason phrase.
    pub fn server(status: u16, payload: Option<&ErrorBody>) -> Self {
        let message = payload
            .and_then(ErrorBody::summary)
            .unwrap_or_else(|| default_status_message(status));
        ApiError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn default_status_message(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason());
    match reason {
        Some(reason) => format!("Request failed: {status} {reason}"),
        None => format!("Request failed with status {status}"),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_builder() {
            ApiError::InvalidRequest(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<TokenStoreError> for ApiError {
    fn from(e: TokenStoreError) -> Self {
        ApiError::Storage(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}
