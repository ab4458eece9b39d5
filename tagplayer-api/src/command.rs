//! Transport and volume commands understood by the control server

use serde::{Deserialize, Serialize};

/// Default volume step for `VolumeUp` / `VolumeDown`
pub const DEFAULT_VOLUME_STEP: u8 = 3;

/// The closed set of commands a dispatcher can send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Toggle between playing and paused
    PlayPause,
    /// Skip to the previous track
    Previous,
    /// Skip to the next track
    Next,
    /// Raise the volume by the configured step
    VolumeUp,
    /// Lower the volume by the configured step
    VolumeDown,
    /// Remove everything from the room's queue
    ClearQueue,
}

impl Command {
    /// All commands, in button order
    pub const ALL: [Command; 6] = [
        Command::PlayPause,
        Command::Previous,
        Command::Next,
        Command::VolumeUp,
        Command::VolumeDown,
        Command::ClearQueue,
    ];

    /// Get the path fragment for this command
    ///
    /// `volume_step` is substituted into the volume commands, so with the
    /// default step `VolumeUp` maps to `volume/+3`.
    pub fn action_segment(&self, volume_step: u8) -> String {
        match self {
            Command::PlayPause => "playpause".to_string(),
            Command::Previous => "previous".to_string(),
            Command::Next => "next".to_string(),
            Command::ClearQueue => "clearqueue".to_string(),
            Command::VolumeUp => format!("volume/+{}", volume_step),
            Command::VolumeDown => format!("volume/-{}", volume_step),
        }
    }

    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Command::PlayPause => "PlayPause",
            Command::Previous => "Previous",
            Command::Next => "Next",
            Command::VolumeUp => "VolumeUp",
            Command::VolumeDown => "VolumeDown",
            Command::ClearQueue => "ClearQueue",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(Command::PlayPause, "playpause")]
    #[case(Command::Previous, "previous")]
    #[case(Command::Next, "next")]
    #[case(Command::ClearQueue, "clearqueue")]
    #[case(Command::VolumeUp, "volume/+3")]
    #[case(Command::VolumeDown, "volume/-3")]
    fn test_action_segment_default_step(#[case] command: Command, #[case] expected: &str) {
        assert_eq!(command.action_segment(DEFAULT_VOLUME_STEP), expected);
    }

    #[test]
    fn test_volume_step_is_substituted() {
        assert_eq!(Command::VolumeUp.action_segment(10), "volume/+10");
        assert_eq!(Command::VolumeDown.action_segment(1), "volume/-1");
        // Non-volume commands ignore the step
        assert_eq!(Command::Next.action_segment(10), "next");
    }

    #[test]
    fn test_all_commands_are_distinct() {
        let segments: HashSet<String> = Command::ALL
            .iter()
            .map(|command| command.action_segment(DEFAULT_VOLUME_STEP))
            .collect();
        let names: HashSet<&str> = Command::ALL.iter().map(Command::name).collect();

        assert_eq!(segments.len(), Command::ALL.len());
        assert_eq!(names.len(), Command::ALL.len());
        assert_eq!(Command::ALL[0], Command::PlayPause);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Command::PlayPause).unwrap();
        assert_eq!(json, "\"play-pause\"");
        let parsed: Command = serde_json::from_str("\"volume-down\"").unwrap();
        assert_eq!(parsed, Command::VolumeDown);
    }
}
