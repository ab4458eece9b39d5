//! Streaming-app deep-links
//!
//! When the control server cannot be reached, a streaming identifier is
//! turned into a `content_linking` URL. Opening it launches the streaming
//! app on the same content, or the web player when the app is missing.

use std::fmt;

use crate::{ContentRef, ControllerConfig, MediaIdentifier, Result};

/// A deep-link ready to be handed to the platform's URL opener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    content_url: String,
    url: String,
}

impl DeepLink {
    /// Build the deep-link for a streaming identifier
    ///
    /// Fails with `ApiError::MalformedIdentifier` when the identifier has no
    /// `type:id` tail.
    pub fn for_identifier(identifier: &MediaIdentifier, config: &ControllerConfig) -> Result<Self> {
        let content = identifier.content_ref()?;
        Ok(Self::for_content(&content, config))
    }

    /// Build the deep-link for already-parsed content
    pub fn for_content(content: &ContentRef, config: &ControllerConfig) -> Self {
        let content_url = format!(
            "https://{}/{}/{}/{}",
            config.content_host, config.content_locale, content.kind, content.id
        );
        // The content URL is embedded unencoded; the link service expects it verbatim
        let url = format!(
            "https://{host}/content_linking?~campaign={campaign}&$deeplink_path={content}&$fallback_url={content}",
            host = config.deeplink_host,
            campaign = config.campaign,
            content = content_url,
        );

        Self { content_url, url }
    }

    /// Canonical web URL of the content
    pub fn content_url(&self) -> &str {
        &self.content_url
    }

    /// The full deep-link URL
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
