//! Media identifiers read from tags
//!
//! An identifier is opaque to the control server client: it is appended to
//! the room path as-is. Only the deep-link fallback looks inside it, and
//! only for streaming identifiers of the form `scheme:type:id`, e.g.
//! `spotify:track:6rqhFgbbKwnb9MLmUQDhG6` or the server route form
//! `spotify/now/spotify:album:1DFixLWuPkv3KT3TnV35m3`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ApiError, Result};

/// Marker that flags an identifier as eligible for the streaming fallback
pub const SPOTIFY_MARKER: &str = "spotify";

/// An opaque, non-empty reference to a track, playlist or album
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaIdentifier(String);

impl MediaIdentifier {
    /// Create an identifier, rejecting empty or whitespace-only input
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidParameter(
                "media identifier must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier mentions the streaming scheme anywhere
    pub fn is_spotify(&self) -> bool {
        self.0.contains(SPOTIFY_MARKER)
    }

    /// Extract the content type and id from the last two `:` segments
    ///
    /// Returns `ApiError::MalformedIdentifier` when there are fewer than two
    /// segments or either of the last two is empty.
    pub fn content_ref(&self) -> Result<ContentRef> {
        let mut segments = self.0.rsplit(':');
        let id = segments.next();
        let kind = segments.next();

        match (kind, id) {
            (Some(kind), Some(id)) if !kind.is_empty() && !id.is_empty() => Ok(ContentRef {
                kind: kind.to_string(),
                id: id.to_string(),
            }),
            _ => Err(ApiError::MalformedIdentifier(self.0.clone())),
        }
    }
}

impl fmt::Display for MediaIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for MediaIdentifier {
    type Error = ApiError;

    fn try_from(s: &str) -> Result<Self> {
        MediaIdentifier::new(s)
    }
}

impl TryFrom<String> for MediaIdentifier {
    type Error = ApiError;

    fn try_from(s: String) -> Result<Self> {
        MediaIdentifier::new(s)
    }
}

/// Content type and id pulled out of a streaming identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    /// `track`, `album`, `playlist`, ...
    pub kind: String,
    pub id: String,
}
