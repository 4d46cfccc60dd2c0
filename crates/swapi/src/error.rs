//! Typed error enum for the remote planets API.

use thiserror::Error;

/// Errors from fetching the remote planet list.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection failure or timeout.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
