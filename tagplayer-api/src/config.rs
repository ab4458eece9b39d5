//! Controller configuration
//!
//! All values have working defaults for the reference installation; callers
//! override individual fields and then call [`ControllerConfig::validate`].

use http_client::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::command::DEFAULT_VOLUME_STEP;
use crate::room::{RoomCatalog, DEFAULT_ROOMS};
use crate::{ApiError, Result};

pub const DEFAULT_HOST: &str = "192.168.178.77";
pub const DEFAULT_PORT: u16 = 5005;
pub const DEFAULT_DEEPLINK_HOST: &str = "spotify.link";
pub const DEFAULT_CONTENT_HOST: &str = "open.spotify.com";
pub const DEFAULT_CONTENT_LOCALE: &str = "intl-de";
pub const DEFAULT_CAMPAIGN: &str = "com.example.tagplayer";

/// Which failures of an identifier request trigger the deep-link fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Only failures where no response arrived (unreachable, timeout, DNS)
    #[default]
    TransportOnly,
    /// Transport failures and non-2xx responses alike
    AnyFailure,
    /// Never open a deep-link
    Disabled,
}

impl FallbackPolicy {
    /// Whether a failed identifier request should fall back
    pub fn applies_to(&self, error: &ApiError) -> bool {
        match self {
            FallbackPolicy::TransportOnly => error.is_transport(),
            FallbackPolicy::AnyFailure => {
                matches!(error, ApiError::Transport(_) | ApiError::Server(_))
            }
            FallbackPolicy::Disabled => false,
        }
    }
}

/// Settings for talking to the control server and building fallbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Control server host name or IP
    pub host: String,
    /// Control server port
    pub port: u16,
    /// Step used by `VolumeUp` / `VolumeDown`
    pub volume_step: u8,
    /// Room catalog; the first entry is the default room
    pub rooms: Vec<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    /// Host serving the `content_linking` deep-link endpoint
    pub deeplink_host: String,
    /// Host of the canonical web content URL
    pub content_host: String,
    /// Locale path segment of the web content URL
    pub content_locale: String,
    /// Campaign tag identifying this application in deep-links
    pub campaign: String,
    pub fallback_policy: FallbackPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            volume_step: DEFAULT_VOLUME_STEP,
            rooms: DEFAULT_ROOMS.iter().map(|r| r.to_string()).collect(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            read_timeout_secs: DEFAULT_READ_TIMEOUT.as_secs(),
            deeplink_host: DEFAULT_DEEPLINK_HOST.to_string(),
            content_host: DEFAULT_CONTENT_HOST.to_string(),
            content_locale: DEFAULT_CONTENT_LOCALE.to_string(),
            campaign: DEFAULT_CAMPAIGN.to_string(),
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl ControllerConfig {
    /// Base URL of the control server, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Build the room catalog described by `rooms`
    pub fn catalog(&self) -> Result<RoomCatalog> {
        RoomCatalog::new(self.rooms.iter().cloned())
    }

    /// Check the configuration for values that would produce broken requests
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ApiError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.host.contains('/') {
            return Err(ApiError::InvalidConfig(format!(
                "host '{}' must not contain a scheme or path",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(ApiError::InvalidConfig("port must not be 0".to_string()));
        }
        if self.volume_step == 0 {
            return Err(ApiError::InvalidConfig("volume step must be positive".to_string()));
        }
        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 {
            return Err(ApiError::InvalidConfig("timeouts must be positive".to_string()));
        }
        for (field, value) in [
            ("deeplink_host", &self.deeplink_host),
            ("content_host", &self.content_host),
            ("campaign", &self.campaign),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }

        self.catalog()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(())
    }
}
