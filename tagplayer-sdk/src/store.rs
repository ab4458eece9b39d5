//! Persistence for the selected room
//!
//! The selection is a single string stored under the key `selected_room`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::SdkError;

/// Key under which the selected room is persisted
pub const SELECTED_ROOM_KEY: &str = "selected_room";

/// Key/value storage for the room preference
pub trait RoomStore: Send + Sync {
    /// Read the stored room name, if any
    fn get_room(&self) -> Result<Option<String>, SdkError>;

    /// Persist a room name
    fn set_room(&self, name: &str) -> Result<(), SdkError>;
}

/// On-disk preference file contents
#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    selected_room: Option<String>,
}

/// JSON preference file, by default `<config dir>/tagplayer/prefs.json`
#[derive(Debug, Clone)]
pub struct FileRoomStore {
    path: PathBuf,
}

impl FileRoomStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform configuration directory
    pub fn default_location() -> Result<Self, SdkError> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SdkError::StoreError("no configuration directory on this platform".to_string())
        })?;
        Ok(Self::new(dir.join("tagplayer").join("prefs.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Preferences, SdkError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl RoomStore for FileRoomStore {
    fn get_room(&self) -> Result<Option<String>, SdkError> {
        Ok(self.load()?.selected_room)
    }

    fn set_room(&self, name: &str) -> Result<(), SdkError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let prefs = Preferences {
            selected_room: Some(name.to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;

        tracing::debug!("Saved {}={} to {}", SELECTED_ROOM_KEY, name, self.path.display());
        Ok(())
    }
}

/// In-memory store, for tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    room: RwLock<Option<String>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a room already stored
    pub fn with_room(name: impl Into<String>) -> Self {
        Self {
            room: RwLock::new(Some(name.into())),
        }
    }
}

impl RoomStore for MemoryRoomStore {
    fn get_room(&self) -> Result<Option<String>, SdkError> {
        self.room
            .read()
            .map(|room| room.clone())
            .map_err(|_| SdkError::StoreError("room lock poisoned".to_string()))
    }

    fn set_room(&self, name: &str) -> Result<(), SdkError> {
        let mut room = self
            .room
            .write()
            .map_err(|_| SdkError::StoreError("room lock poisoned".to_string()))?;
        *room = Some(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRoomStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get_room().unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FileRoomStore::new(&path).set_room("Wohnzimmer").unwrap();

        let reopened = FileRoomStore::new(&path);
        assert_eq!(reopened.get_room().unwrap().as_deref(), Some("Wohnzimmer"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"selected_room\": \"Wohnzimmer\""));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let result = FileRoomStore::new(&path).get_room();
        assert!(matches!(result, Err(SdkError::StoreError(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryRoomStore::new();
        assert_eq!(store.get_room().unwrap(), None);
        store.set_room("Bad").unwrap();
        assert_eq!(store.get_room().unwrap().as_deref(), Some("Bad"));

        let seeded = MemoryRoomStore::with_room("Kinderzimmer");
        assert_eq!(seeded.get_room().unwrap().as_deref(), Some("Kinderzimmer"));
    }
}
