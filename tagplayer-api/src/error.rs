use http_client::HttpError;
use thiserror::Error;

/// High-level API errors for control operations
///
/// None of these are fatal to a dispatcher. They are reported and, for
/// transport failures on streaming identifiers, may lead to a deep-link
/// fallback.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never reached the control server
    ///
    /// Covers connection refused, DNS failures, timeouts and similar
    /// network-level problems.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The control server answered with a non-2xx status
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// A media identifier could not be split into type and id
    #[error("Malformed identifier '{0}': expected at least two ':'-delimited segments")]
    MalformedIdentifier(String),

    /// Invalid parameter value, such as an empty identifier or room name
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration rejected by `ControllerConfig::validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// True for failures that happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Transport(msg) => ApiError::Transport(msg),
            HttpError::Status { code, .. } => ApiError::Server(code),
        }
    }
}
