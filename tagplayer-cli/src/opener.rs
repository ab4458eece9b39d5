//! Link openers for the command line

use std::process::{Command, Stdio};

use tagplayer_api::DeepLink;
use tagplayer_sdk::{LinkOpener, SdkError};

/// Prints fallback links to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&self, link: &DeepLink) -> Result<(), SdkError> {
        println!("{}", link);
        Ok(())
    }
}

/// Hands fallback links to the desktop's URL handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(url);
            command
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            // The empty title argument keeps `start` from treating the URL as one
            command.args(["/C", "start", "", url]);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, link: &DeepLink) -> Result<(), SdkError> {
        launch(Self::command(link.as_str()))
    }
}

/// Start the URL handler without waiting for it to exit
fn launch(mut command: Command) -> Result<(), SdkError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_child| ())
        .map_err(|e| SdkError::OpenerError(e.to_string()))
}
