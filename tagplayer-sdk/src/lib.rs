//! # TagPlayer SDK
//!
//! Headless core of a tag-driven remote for a node-sonos-http-api style
//! control server:
//!
//! ```rust,no_run
//! use tagplayer_api::ControllerConfig;
//! use tagplayer_sdk::{TagPayload, TagPlayer};
//!
//! fn main() -> Result<(), tagplayer_sdk::SdkError> {
//!     let player = TagPlayer::new(ControllerConfig::default())?;
//!
//!     // Buttons return immediately; the request runs in the background
//!     player.play_pause();
//!
//!     // Tags clear the queue, then play the identifier
//!     let dispatch = player.handle_tag(&TagPayload::Qr("spotify:track:ABC123".into()))?;
//!     let report = dispatch.play.wait()?;
//!     if let Some(link) = report.opened_link() {
//!         println!("Server unreachable, opened {}", link);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! tagplayer-sdk (TagPlayer, RoomSelector, CommandDispatcher)
//!     ↓
//! tagplayer-api (Command, Room, ControlRequest, DeepLink)
//!     ↓
//! http-client (blocking GET)
//! ```

pub use dispatch::{
    CommandDispatcher, DispatchHandle, DispatchObserver, DispatchReport, FallbackOutcome,
    IdentifierDispatch,
};
pub use error::SdkError;
pub use opener::{LinkOpener, LoggingOpener};
pub use player::{TagPlayer, TagPlayerBuilder};
pub use room::RoomSelector;
pub use store::{FileRoomStore, MemoryRoomStore, RoomStore};
pub use tag::{decode_ndef_records, TagPayload};

pub mod logging;
pub mod store;
pub mod tag;

mod dispatch;
mod error;
mod opener;
mod player;
mod room;
