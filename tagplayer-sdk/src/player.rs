//! TagPlayer - main entry point for front-ends
//!
//! Combines the room selector and the dispatcher: every button press reads
//! the current room and hands it to the dispatcher explicitly.

use std::sync::Arc;

use tagplayer_api::{
    Command, ControlClient, ControlTransport, ControllerConfig, MediaIdentifier, Room,
    RoomCatalog,
};

use crate::dispatch::{CommandDispatcher, DispatchHandle, DispatchObserver, IdentifierDispatch};
use crate::opener::{LinkOpener, LoggingOpener};
use crate::room::RoomSelector;
use crate::store::{FileRoomStore, RoomStore};
use crate::tag::TagPayload;
use crate::SdkError;

/// The five buttons, the scanner and the room picker, minus the UI
///
/// # Example
///
/// ```rust,no_run
/// use tagplayer_api::ControllerConfig;
/// use tagplayer_sdk::{TagPayload, TagPlayer};
///
/// let player = TagPlayer::new(ControllerConfig::default())?;
/// player.select_room("Wohnzimmer")?;
/// player.volume_up();
/// player.handle_tag(&TagPayload::Qr("spotify:track:ABC123".to_string()))?;
/// # Ok::<(), tagplayer_sdk::SdkError>(())
/// ```
pub struct TagPlayer {
    dispatcher: CommandDispatcher,
    rooms: RoomSelector,
}

impl TagPlayer {
    /// Create a player with the file-backed room store and logging-only link opener
    pub fn new(config: ControllerConfig) -> Result<Self, SdkError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ControllerConfig) -> TagPlayerBuilder {
        TagPlayerBuilder::new(config)
    }

    pub fn play_pause(&self) -> DispatchHandle {
        self.command(Command::PlayPause)
    }

    pub fn previous(&self) -> DispatchHandle {
        self.command(Command::Previous)
    }

    pub fn next(&self) -> DispatchHandle {
        self.command(Command::Next)
    }

    pub fn volume_up(&self) -> DispatchHandle {
        self.command(Command::VolumeUp)
    }

    pub fn volume_down(&self) -> DispatchHandle {
        self.command(Command::VolumeDown)
    }

    pub fn clear_queue(&self) -> DispatchHandle {
        self.command(Command::ClearQueue)
    }

    /// Send any command to the current room
    pub fn command(&self, command: Command) -> DispatchHandle {
        self.dispatcher.dispatch_command(command, &self.rooms.current())
    }

    /// Play a raw identifier string in the current room
    pub fn play(&self, identifier: &str) -> Result<IdentifierDispatch, SdkError> {
        let identifier = MediaIdentifier::new(identifier)?;
        Ok(self.play_identifier(&identifier))
    }

    pub fn play_identifier(&self, identifier: &MediaIdentifier) -> IdentifierDispatch {
        self.dispatcher
            .dispatch_identifier(identifier, &self.rooms.current())
    }

    /// Decode a scanned tag and play it in the current room
    pub fn handle_tag(&self, payload: &TagPayload) -> Result<IdentifierDispatch, SdkError> {
        let identifier = payload.decode()?;
        tracing::info!("Tag read: {}", identifier);
        Ok(self.play_identifier(&identifier))
    }

    /// The room requests currently go to
    pub fn room(&self) -> Room {
        self.rooms.current()
    }

    pub fn rooms(&self) -> &RoomCatalog {
        self.rooms.catalog()
    }

    pub fn select_room(&self, name: &str) -> Result<Room, SdkError> {
        self.rooms.select(name)
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }
}

/// Builder for [`TagPlayer`]
pub struct TagPlayerBuilder {
    config: ControllerConfig,
    store: Option<Arc<dyn RoomStore>>,
    transport: Option<Arc<dyn ControlTransport>>,
    opener: Option<Arc<dyn LinkOpener>>,
    observer: Option<DispatchObserver>,
}

impl TagPlayerBuilder {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            store: None,
            transport: None,
            opener: None,
            observer: None,
        }
    }

    /// Persist the room selection somewhere other than the default file
    pub fn with_room_store(mut self, store: Arc<dyn RoomStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the HTTP client
    pub fn with_transport(mut self, transport: Arc<dyn ControlTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_link_opener(mut self, opener: Arc<dyn LinkOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    pub fn with_observer(mut self, observer: DispatchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<TagPlayer, SdkError> {
        self.config.validate()?;
        let catalog = self.config.catalog()?;

        let store: Arc<dyn RoomStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileRoomStore::default_location()?),
        };
        let transport: Arc<dyn ControlTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ControlClient::new(self.config.clone())),
        };
        let opener: Arc<dyn LinkOpener> = match self.opener {
            Some(opener) => opener,
            None => Arc::new(LoggingOpener),
        };

        let rooms = RoomSelector::new(catalog, store);
        let dispatcher = CommandDispatcher::with_parts(self.config, transport, opener, self.observer);

        Ok(TagPlayer { dispatcher, rooms })
    }
}
