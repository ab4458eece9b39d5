//! Hand-off of deep-links to the platform

use tagplayer_api::DeepLink;

use crate::SdkError;

/// Something that can ask the platform to open a URL
///
/// Opening is a request: success means the hand-off happened, not that an
/// app actually showed the content.
pub trait LinkOpener: Send + Sync {
    fn open(&self, link: &DeepLink) -> Result<(), SdkError>;
}

/// Opener for headless use: records the link in the log and nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingOpener;

impl LinkOpener for LoggingOpener {
    fn open(&self, link: &DeepLink) -> Result<(), SdkError> {
        tracing::info!("Deep-link fallback: {}", link);
        Ok(())
    }
}
