//! Current-room selection

use std::sync::{Arc, RwLock};

use tagplayer_api::{Room, RoomCatalog};

use crate::store::RoomStore;
use crate::SdkError;

/// Owns the catalog and the single current room
///
/// The current room is loaded from the store once at construction and
/// written back on every explicit selection. A stored name that is no
/// longer in the catalog falls back to the catalog's first room.
pub struct RoomSelector {
    catalog: RoomCatalog,
    store: Arc<dyn RoomStore>,
    current: RwLock<Room>,
}

impl RoomSelector {
    /// Load the current room from `store`
    pub fn new(catalog: RoomCatalog, store: Arc<dyn RoomStore>) -> Self {
        let current = match store.get_room() {
            Ok(Some(name)) => match catalog.find(&name) {
                Some(room) => room.clone(),
                None => {
                    tracing::warn!(
                        "Stored room '{}' is not in the catalog, using '{}'",
                        name,
                        catalog.default_room()
                    );
                    catalog.default_room().clone()
                }
            },
            Ok(None) => catalog.default_room().clone(),
            Err(e) => {
                tracing::warn!("Failed to read stored room: {}", e);
                catalog.default_room().clone()
            }
        };

        tracing::debug!("Current room: {}", current);

        Self {
            catalog,
            store,
            current: RwLock::new(current),
        }
    }

    /// The room requests are sent to right now
    pub fn current(&self) -> Room {
        match self.current.read() {
            Ok(room) => room.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Select a room by name and persist the choice
    ///
    /// Names outside the catalog are rejected. A failure to persist is
    /// logged but does not undo the selection.
    pub fn select(&self, name: &str) -> Result<Room, SdkError> {
        let room = self
            .catalog
            .find(name)
            .cloned()
            .ok_or_else(|| SdkError::UnknownRoom(name.to_string()))?;

        self.set_current(room.clone());

        if let Err(e) = self.store.set_room(room.as_str()) {
            tracing::warn!("Failed to persist room '{}': {}", room, e);
        }

        tracing::info!("Selected room: {}", room);
        Ok(room)
    }

    /// Select a room by its position in the catalog
    pub fn select_index(&self, index: usize) -> Result<Room, SdkError> {
        let name = self
            .catalog
            .get(index)
            .map(|room| room.as_str().to_string())
            .ok_or_else(|| SdkError::UnknownRoom(format!("#{}", index)))?;
        self.select(&name)
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    fn set_current(&self, room: Room) {
        match self.current.write() {
            Ok(mut current) => *current = room,
            Err(poisoned) => *poisoned.into_inner() = room,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRoomStore;

    struct FailingStore;

    impl RoomStore for FailingStore {
        fn get_room(&self) -> Result<Option<String>, SdkError> {
            Err(SdkError::StoreError("disk on fire".to_string()))
        }

        fn set_room(&self, _name: &str) -> Result<(), SdkError> {
            Err(SdkError::StoreError("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_defaults_to_first_room() {
        let selector = RoomSelector::new(RoomCatalog::default(), Arc::new(MemoryRoomStore::new()));
        assert_eq!(selector.current().as_str(), "Kinderzimmer");
    }

    #[test]
    fn test_loads_stored_room() {
        let store = Arc::new(MemoryRoomStore::with_room("Bad"));
        let selector = RoomSelector::new(RoomCatalog::default(), store);
        assert_eq!(selector.current().as_str(), "Bad");
    }

    #[test]
    fn test_stored_room_outside_catalog_falls_back() {
        let store = Arc::new(MemoryRoomStore::with_room("Dachboden"));
        let selector = RoomSelector::new(RoomCatalog::default(), store);
        assert_eq!(selector.current().as_str(), "Kinderzimmer");
    }

    #[test]
    fn test_select_persists() {
        let store = Arc::new(MemoryRoomStore::new());
        let selector = RoomSelector::new(RoomCatalog::default(), store.clone());

        let room = selector.select("Wohnzimmer").unwrap();
        assert_eq!(room.as_str(), "Wohnzimmer");
        assert_eq!(selector.current().as_str(), "Wohnzimmer");
        assert_eq!(store.get_room().unwrap().as_deref(), Some("Wohnzimmer"));
    }

    #[test]
    fn test_select_unknown_room() {
        let selector = RoomSelector::new(RoomCatalog::default(), Arc::new(MemoryRoomStore::new()));
        assert!(matches!(selector.select("Garage"), Err(SdkError::UnknownRoom(_))));
        assert_eq!(selector.current().as_str(), "Kinderzimmer");
    }

    #[test]
    fn test_select_index() {
        let selector = RoomSelector::new(RoomCatalog::default(), Arc::new(MemoryRoomStore::new()));
        assert_eq!(selector.select_index(2).unwrap().as_str(), "Bad");
        assert!(matches!(selector.select_index(3), Err(SdkError::UnknownRoom(_))));
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let selector = RoomSelector::new(RoomCatalog::default(), Arc::new(FailingStore));
        assert_eq!(selector.current().as_str(), "Kinderzimmer");

        selector.select("Bad").unwrap();
        assert_eq!(selector.current().as_str(), "Bad");
    }
}
