//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur while talking to the control server
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request never produced a response (unreachable host, DNS, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status outside 2xx
    #[error("HTTP status {code}")]
    Status { code: u16, body: Option<String> },
}

impl HttpError {
    /// True when the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, HttpError::Transport(_))
    }
}
