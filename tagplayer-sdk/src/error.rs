use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    ApiError(#[from] tagplayer_api::ApiError),

    #[error("Room not in catalog: {0}")]
    UnknownRoom(String),

    #[error("Room store error: {0}")]
    StoreError(String),

    #[error("Invalid tag payload: {0}")]
    InvalidTag(String),

    #[error("Failed to open link: {0}")]
    OpenerError(String),

    #[error("Dispatch worker exited without reporting")]
    DispatchLost,

    #[error("Timed out waiting for dispatch report")]
    DispatchTimeout,
}

impl From<std::io::Error> for SdkError {
    fn from(error: std::io::Error) -> Self {
        SdkError::StoreError(error.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(error: serde_json::Error) -> Self {
        SdkError::StoreError(error.to_string())
    }
}
