//! Command-line arguments and environment overrides

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use tagplayer_api::command::DEFAULT_VOLUME_STEP;
use tagplayer_api::room::DEFAULT_ROOMS;
use tagplayer_api::{ControllerConfig, FallbackPolicy};

/// TagPlayer remote
///
/// Sends transport commands and tag identifiers to a node-sonos-http-api
/// style control server, falling back to a streaming deep-link when the
/// server is unreachable.
#[derive(Parser, Debug)]
#[command(name = "tagplayer")]
#[command(about = "Remote control for a node-sonos-http-api server driven by QR codes and NFC tags")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Action,

    /// Control server host
    #[arg(long, default_value = tagplayer_api::config::DEFAULT_HOST)]
    pub host: String,

    /// Control server port
    #[arg(short, long, default_value_t = tagplayer_api::config::DEFAULT_PORT)]
    pub port: u16,

    /// Volume step for volume-up / volume-down
    #[arg(long, default_value_t = DEFAULT_VOLUME_STEP)]
    pub volume_step: u8,

    /// Comma-separated room catalog; the first room is the default
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_ROOMS.map(String::from))]
    pub rooms: Vec<String>,

    /// Campaign tag embedded in fallback deep-links
    #[arg(long, default_value = tagplayer_api::config::DEFAULT_CAMPAIGN)]
    pub campaign: String,

    /// When identifier requests fall back to a deep-link
    #[arg(long, value_enum, default_value_t = PolicyArg::TransportOnly)]
    pub fallback: PolicyArg,

    /// Preference file holding the selected room (default: platform config dir)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Print fallback deep-links instead of opening them
    #[arg(long)]
    pub print_links: bool,

    /// Seconds to wait for each request to finish
    #[arg(long, default_value = "15")]
    pub wait_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    ///
    /// TAGPLAYER_LOG_LEVEL and RUST_LOG take precedence over this flag, in that order.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Toggle play/pause in the current room
    PlayPause,
    /// Previous track
    Previous,
    /// Next track
    Next,
    /// Raise the volume by one step
    VolumeUp,
    /// Lower the volume by one step
    VolumeDown,
    /// Clear the queue
    ClearQueue,
    /// Clear the queue and play a media identifier
    Play {
        /// e.g. spotify:track:6rqhFgbbKwnb9MLmUQDhG6
        identifier: String,
    },
    /// Play the text of a scanned QR code
    Scan {
        payload: String,
    },
    /// Play an NFC text-record payload given as hex bytes
    Nfc {
        /// e.g. 02656e73706f746966793a747261636b3a414243
        hex: String,
    },
    /// Show, list or change the current room
    Room {
        #[command(subcommand)]
        action: Option<RoomAction>,
    },
    /// Print the effective configuration as JSON
    Config,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RoomAction {
    /// Print the current room
    Show,
    /// List the room catalog
    List,
    /// Select a room from the catalog
    Set { name: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    TransportOnly,
    AnyFailure,
    Disabled,
}

impl From<PolicyArg> for FallbackPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::TransportOnly => FallbackPolicy::TransportOnly,
            PolicyArg::AnyFailure => FallbackPolicy::AnyFailure,
            PolicyArg::Disabled => FallbackPolicy::Disabled,
        }
    }
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.wait_secs == 0 {
            return Err(anyhow::anyhow!("Wait time must be positive"));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        Ok(())
    }

    /// Apply `TAGPLAYER_*` environment variables over parsed arguments
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("TAGPLAYER_HOST") {
            self.host = host;
        }

        if let Some(port) = var("TAGPLAYER_PORT") {
            self.port = port
                .parse()
                .context("Invalid TAGPLAYER_PORT environment variable")?;
        }

        if let Some(step) = var("TAGPLAYER_VOLUME_STEP") {
            self.volume_step = step
                .parse()
                .context("Invalid TAGPLAYER_VOLUME_STEP environment variable")?;
        }

        if let Some(rooms) = var("TAGPLAYER_ROOMS") {
            self.rooms = rooms.split(',').map(|r| r.trim().to_string()).collect();
        }

        if let Some(campaign) = var("TAGPLAYER_CAMPAIGN") {
            self.campaign = campaign;
        }

        if let Some(prefs) = var("TAGPLAYER_PREFS") {
            self.prefs = Some(PathBuf::from(prefs));
        }

        if let Some(level) = var("TAGPLAYER_LOG_LEVEL") {
            self.log_level = level;
        }

        if var("TAGPLAYER_PRINT_LINKS").is_some() {
            self.print_links = true;
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments and environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub controller: ControllerConfig,
    pub prefs: Option<PathBuf>,
    pub print_links: bool,
    pub wait: Duration,
    pub log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let controller = ControllerConfig {
            host: args.host,
            port: args.port,
            volume_step: args.volume_step,
            rooms: args.rooms,
            campaign: args.campaign,
            fallback_policy: args.fallback.into(),
            ..ControllerConfig::default()
        };

        Self {
            action: args.command,
            controller,
            prefs: args.prefs,
            print_links: args.print_links,
            wait: Duration::from_secs(args.wait_secs),
            log_level: args.log_level,
        }
    }
}

impl Config {
    /// Create configuration from command line arguments and environment variables
    pub fn from_env() -> Result<Self> {
        let mut args = Args::parse();
        args.apply_env(|name| std::env::var(name).ok())?;
        args.validate()?;

        let config = Config::from(args);
        config
            .controller
            .validate()
            .context("Invalid controller configuration")?;

        Ok(config)
    }

    pub fn print_summary(&self) {
        info!("Configuration:");
        info!("  Server: {}", self.controller.base_url());
        info!("  Volume step: {}", self.controller.volume_step);
        info!("  Rooms: {}", self.controller.rooms.join(", "));
        info!("  Fallback: {:?}", self.controller.fallback_policy);
        info!("  Print links: {}", self.print_links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tagplayer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from(parse(&["next"]));
        assert_eq!(config.action, Action::Next);
        assert_eq!(config.controller, ControllerConfig::default());
        assert!(!config.print_links);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "--host",
            "10.0.0.5",
            "--port",
            "8080",
            "--rooms",
            "Office,Kitchen",
            "--fallback",
            "any-failure",
            "play",
            "spotify:track:ABC123",
        ]);
        let config = Config::from(args);

        assert_eq!(config.controller.base_url(), "http://10.0.0.5:8080");
        assert_eq!(config.controller.rooms, vec!["Office", "Kitchen"]);
        assert_eq!(config.controller.fallback_policy, FallbackPolicy::AnyFailure);
        assert_eq!(
            config.action,
            Action::Play {
                identifier: "spotify:track:ABC123".to_string()
            }
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TAGPLAYER_HOST", "192.168.1.2"),
            ("TAGPLAYER_PORT", "5006"),
            ("TAGPLAYER_ROOMS", "Bad, Flur"),
            ("TAGPLAYER_PRINT_LINKS", "1"),
        ]
        .into_iter()
        .collect();

        let mut args = parse(&["room", "list"]);
        args.apply_env(|name| env.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(args.host, "192.168.1.2");
        assert_eq!(args.port, 5006);
        assert_eq!(args.rooms, vec!["Bad", "Flur"]);
        assert!(args.print_links);
    }

    #[test]
    fn test_invalid_env_port() {
        let mut args = parse(&["next"]);
        let result = args.apply_env(|name| (name == "TAGPLAYER_PORT").then(|| "abc".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_help_documents_log_precedence() {
        use clap::CommandFactory;

        let help = Args::command().render_long_help().to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("TAGPLAYER_LOG_LEVEL and RUST_LOG take precedence"));
    }

    #[test]
    fn test_validate_log_level() {
        let mut args = parse(&["next"]);
        assert!(args.validate().is_ok());
        args.log_level = "loud".to_string();
        assert!(args.validate().is_err());
    }
}
