use reqwest::StatusCode;
use thiserror::Error;

/// Failures from the authenticated REST surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response carrying an `error` message.
    #[error("API error: {0}")]
    Server(String),

    /// Non-2xx response without a usable message.
    #[error("API error (HTTP {status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("failed to parse response")]
    Decode(#[source] serde_json::Error),
}
