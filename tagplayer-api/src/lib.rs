//! Typed control API for tagplayer
//!
//! This crate models the requests a tag player sends to a
//! node-sonos-http-api style control server: transport commands, volume
//! steps and media identifiers, each addressed to one room. It uses the
//! private `http-client` crate for the actual `GET` calls.
//!
//! ```rust,no_run
//! use tagplayer_api::{
//!     Command, ControlClient, ControlRequest, ControlTransport, ControllerConfig, MediaIdentifier,
//! };
//!
//! let config = ControllerConfig::default();
//! let room = config.catalog()?.default_room().clone();
//! let client = ControlClient::new(config.clone());
//!
//! client.send(&ControlRequest::command(room.clone(), Command::ClearQueue, config.volume_step))?;
//! client.send(&ControlRequest::play(room, MediaIdentifier::new("spotify:track:ABC123")?))?;
//! # Ok::<(), tagplayer_api::ApiError>(())
//! ```

pub mod client;
pub mod command;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod identifier;
pub mod request;
pub mod room;

pub use client::{ControlClient, ControlResponse, ControlTransport};
pub use command::Command;
pub use config::{ControllerConfig, FallbackPolicy};
pub use deeplink::DeepLink;
pub use error::{ApiError, Result};
pub use identifier::{ContentRef, MediaIdentifier};
pub use request::{Action, ControlRequest};
pub use room::{Room, RoomCatalog};
