//! Control request construction
//!
//! A request addresses exactly one room and carries exactly one action. The
//! URL is `http://{host}:{port}/{room}/{segment}` where the segment is either
//! a command fragment or a raw media identifier, colons left unescaped.

use crate::{Command, ControllerConfig, MediaIdentifier, Room};

/// What a request asks the room to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Command(Command),
    Play(MediaIdentifier),
}

/// A fully resolved request for one room and one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    room: Room,
    action: Action,
    segment: String,
}

impl ControlRequest {
    /// Build a request for a command, substituting the volume step
    pub fn command(room: Room, command: Command, volume_step: u8) -> Self {
        Self {
            segment: command.action_segment(volume_step),
            room,
            action: Action::Command(command),
        }
    }

    /// Build a request that plays a media identifier
    pub fn play(room: Room, identifier: MediaIdentifier) -> Self {
        Self {
            segment: identifier.as_str().to_string(),
            room,
            action: Action::Play(identifier),
        }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The identifier being played, if this is a play request
    pub fn identifier(&self) -> Option<&MediaIdentifier> {
        match &self.action {
            Action::Play(identifier) => Some(identifier),
            Action::Command(_) => None,
        }
    }

    /// Path component, e.g. `/Bad/volume/+3`
    pub fn path(&self) -> String {
        format!("/{}/{}", self.room, self.segment)
    }

    /// Full URL against the configured control server
    pub fn url(&self, config: &ControllerConfig) -> String {
        format!("{}{}", config.base_url(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> Room {
        Room::new(name).unwrap()
    }

    #[test]
    fn test_command_path() {
        let request = ControlRequest::command(room("Bad"), Command::VolumeUp, 3);
        assert_eq!(request.path(), "/Bad/volume/+3");
        assert!(request.identifier().is_none());
        assert_eq!(request.action(), &Action::Command(Command::VolumeUp));
    }

    #[test]
    fn test_identifier_path_keeps_colons() {
        let identifier = MediaIdentifier::new("spotify:track:ABC123").unwrap();
        let request = ControlRequest::play(room("Bad"), identifier.clone());
        assert_eq!(request.path(), "/Bad/spotify:track:ABC123");
        assert_eq!(request.identifier(), Some(&identifier));
    }

    #[test]
    fn test_url_uses_config() {
        let config = ControllerConfig::default();
        let request = ControlRequest::command(room("Wohnzimmer"), Command::PlayPause, 3);
        assert_eq!(
            request.url(&config),
            "http://192.168.178.77:5005/Wohnzimmer/playpause"
        );
    }
}
