use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod config;
mod nfc_input;
mod opener;

use config::{Action, Config, RoomAction};
use opener::{PrintOpener, SystemOpener};
use tagplayer_api::Command;
use tagplayer_sdk::{
    logging, DispatchHandle, DispatchReport, FallbackOutcome, FileRoomStore, IdentifierDispatch,
    LinkOpener, RoomStore, TagPayload, TagPlayer,
};

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            print_env_help();
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init_development(&config.log_level.to_lowercase()) {
        eprintln!("Warning: {}", e);
    }
    config.print_summary();

    match run(config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Print help information about environment variables
fn print_env_help() {
    eprintln!();
    eprintln!("Environment Variables:");
    eprintln!("  TAGPLAYER_HOST          Control server host (default: 192.168.178.77)");
    eprintln!("  TAGPLAYER_PORT          Control server port (default: 5005)");
    eprintln!("  TAGPLAYER_VOLUME_STEP   Volume step (default: 3)");
    eprintln!("  TAGPLAYER_ROOMS         Comma-separated room catalog");
    eprintln!("  TAGPLAYER_CAMPAIGN      Campaign tag for deep-links");
    eprintln!("  TAGPLAYER_PREFS         Preference file for the selected room");
    eprintln!("  TAGPLAYER_PRINT_LINKS   Print deep-links instead of opening them (set to enable)");
    eprintln!("  TAGPLAYER_LOG_LEVEL     Log level (default: warn)");
    eprintln!("  RUST_LOG                Log filter, used when TAGPLAYER_LOG_LEVEL is unset");
    eprintln!();
    eprintln!("Log filter precedence: TAGPLAYER_LOG_LEVEL, RUST_LOG, --log-level.");
}

/// Execute the requested action; `Ok(false)` means the request itself failed
fn run(config: Config) -> Result<bool> {
    let wait = config.wait;
    let player = || build_player(&config);

    match config.action.clone() {
        Action::Config => {
            let json = serde_json::to_string_pretty(&config.controller)
                .context("Failed to serialize configuration")?;
            println!("{}", json);
            Ok(true)
        }
        Action::PlayPause => Ok(report_command(player()?.play_pause(), wait)),
        Action::Previous => Ok(report_command(player()?.previous(), wait)),
        Action::Next => Ok(report_command(player()?.next(), wait)),
        Action::VolumeUp => Ok(report_command(player()?.volume_up(), wait)),
        Action::VolumeDown => Ok(report_command(player()?.volume_down(), wait)),
        Action::ClearQueue => Ok(report_command(player()?.command(Command::ClearQueue), wait)),
        Action::Play { identifier } => {
            let dispatch = player()?
                .play(&identifier)
                .context("Cannot play identifier")?;
            Ok(report_identifier(dispatch, wait))
        }
        Action::Scan { payload } => {
            let dispatch = player()?
                .handle_tag(&TagPayload::Qr(payload))
                .context("Cannot use scanned QR code")?;
            Ok(report_identifier(dispatch, wait))
        }
        Action::Nfc { hex: payload } => {
            let bytes = nfc_input::decode_hex(&payload).context("Cannot decode NFC payload")?;
            let dispatch = player()?
                .handle_tag(&TagPayload::Nfc(bytes))
                .context("Cannot use NFC payload")?;
            Ok(report_identifier(dispatch, wait))
        }
        Action::Room { action } => {
            run_room(&player()?, action.unwrap_or(RoomAction::Show))?;
            Ok(true)
        }
    }
}

fn build_player(config: &Config) -> Result<TagPlayer> {
    let store: Arc<dyn RoomStore> = match &config.prefs {
        Some(path) => Arc::new(FileRoomStore::new(path)),
        None => Arc::new(
            FileRoomStore::default_location().context("Cannot locate preference file")?,
        ),
    };
    let opener: Arc<dyn LinkOpener> = if config.print_links {
        Arc::new(PrintOpener)
    } else {
        Arc::new(SystemOpener)
    };

    TagPlayer::builder(config.controller.clone())
        .with_room_store(store)
        .with_link_opener(opener)
        .build()
        .context("Failed to set up player")
}

fn run_room(player: &TagPlayer, action: RoomAction) -> Result<()> {
    match action {
        RoomAction::Show => println!("{}", player.room()),
        RoomAction::List => {
            let current = player.room();
            for room in player.rooms().rooms() {
                let marker = if *room == current { "*" } else { " " };
                println!("{} {}", marker, room);
            }
        }
        RoomAction::Set { name } => {
            let room = player
                .select_room(&name)
                .with_context(|| format!("Cannot select room '{}'", name))?;
            info!("Room set to {}", room);
            println!("{}", room);
        }
    }
    Ok(())
}

fn report_command(handle: DispatchHandle, wait: Duration) -> bool {
    let path = handle.request().path();
    match handle.wait_timeout(wait) {
        Ok(report) => print_report(&report),
        Err(e) => {
            eprintln!("{}: {}", path, e);
            false
        }
    }
}

/// Waits for both requests; success is decided by the play request alone
fn report_identifier(dispatch: IdentifierDispatch, wait: Duration) -> bool {
    report_command(dispatch.clear_queue, wait);
    report_command(dispatch.play, wait)
}

fn print_report(report: &DispatchReport) -> bool {
    let path = report.request.path();
    match &report.result {
        Ok(response) => {
            println!("{} -> HTTP {}", path, response.status);
        }
        Err(e) => {
            eprintln!("{} -> {}", path, e);
        }
    }

    match &report.fallback {
        Some(FallbackOutcome::Opened(link)) => {
            eprintln!("  opened fallback {}", link.content_url());
        }
        Some(FallbackOutcome::OpenFailed { link, error }) => {
            eprintln!("  could not open fallback {}: {}", link.content_url(), error);
        }
        Some(FallbackOutcome::Skipped(reason)) => {
            eprintln!("  no fallback: {}", reason);
        }
        None => {}
    }

    report.is_success() || report.opened_link().is_some()
}
