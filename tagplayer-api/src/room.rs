//! Room identity and the fixed room catalog

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ApiError, Result};

/// Rooms offered when no catalog is configured
pub const DEFAULT_ROOMS: [&str; 3] = ["Kinderzimmer", "Wohnzimmer", "Bad"];

/// A named playback zone on the control server
///
/// The name is used verbatim as the first path segment of every request,
/// so it must be URL-path-safe text. Surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Room(String);

impl Room {
    /// Creates a new Room, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidParameter("room name must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the room name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Room {
    type Error = ApiError;

    fn try_from(s: &str) -> Result<Self> {
        Room::new(s)
    }
}

impl TryFrom<String> for Room {
    type Error = ApiError;

    fn try_from(s: String) -> Result<Self> {
        Room::new(s)
    }
}

/// The closed list of rooms a user can pick from
///
/// Always holds at least one room; the first entry is the default selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Build a catalog from room names
    ///
    /// Fails on an empty list, a blank name, or a duplicate name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rooms: Vec<Room> = Vec::new();
        for name in names {
            let room = Room::new(name)?;
            if rooms.contains(&room) {
                return Err(ApiError::InvalidConfig(format!("duplicate room '{}'", room)));
            }
            rooms.push(room);
        }

        if rooms.is_empty() {
            return Err(ApiError::InvalidConfig("room catalog must not be empty".to_string()));
        }

        Ok(Self { rooms })
    }

    /// The room selected when nothing has been chosen yet
    pub fn default_room(&self) -> &Room {
        // Construction guarantees at least one entry
        &self.rooms[0]
    }

    /// Look up a room by name
    pub fn find(&self, name: &str) -> Option<&Room> {
        let name = name.trim();
        self.rooms.iter().find(|room| room.as_str() == name)
    }

    /// Position of a room in the catalog
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.rooms.iter().position(|room| room.as_str() == name)
    }

    pub fn get(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self {
            rooms: DEFAULT_ROOMS
                .iter()
                .map(|name| Room(name.to_string()))
                .collect(),
        }
    }
}
