//! HTTP adapter error types.

use farmhub_domain::error::{FarmhubError, RemoteError};

/// Errors raised while talking to the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// No bearer token in the session; the request was never sent.
    #[error("no authentication token, refusing to call {0}")]
    MissingToken(String),

    /// Connection, TLS, or timeout failure.
    #[error("HTTP transport failure")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },

    /// A 2xx body that is not the expected JSON.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),
}

impl From<HttpError> for FarmhubError {
    fn from(err: HttpError) -> Self {
        let remote = match err {
            HttpError::Status { status, message } => RemoteError::status(status, message),
            HttpError::Transport(_) => RemoteError::transport(err),
            HttpError::MissingToken(_) => RemoteError {
                status: Some(401),
                message: None,
                source: Some(Box::new(err)),
            },
            HttpError::Decode(_) => RemoteError {
                status: None,
                message: Some("Unexpected response from the server.".to_string()),
                source: Some(Box::new(err)),
            },
        };
        Self::Remote(remote)
    }
}
