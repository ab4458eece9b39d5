//! Logging setup for tagplayer front-ends
//!
//! The library itself only emits `tracing` events. Front-ends pick how those
//! events are rendered by calling one of the init functions here once at
//! startup.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with thread ids and source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),
}

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `TAGPLAYER_LOG_LEVEL`: Override the filter (e.g. `debug`, `tagplayer_sdk=trace`)
/// - `RUST_LOG`: Used when `TAGPLAYER_LOG_LEVEL` is not set
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let default_level = match mode {
        LoggingMode::Debug => "debug",
        _ => "info",
    };
    init_with_default_level(mode, default_level)
}

/// Development-mode logging with a caller-chosen default level
///
/// The environment variables still take precedence over `default_level`.
pub fn init_development(default_level: &str) -> Result<(), LoggingError> {
    init_with_default_level(LoggingMode::Development, default_level)
}

fn init_with_default_level(mode: LoggingMode, default_level: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter(default_level)?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr)
                        .compact(),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter(default_level)?;

            Registry::default()
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Initialize logging from `TAGPLAYER_LOG_MODE`
///
/// - "development" -> LoggingMode::Development
/// - "debug" -> LoggingMode::Debug
/// - anything else -> LoggingMode::Silent
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    init_logging(mode_from_env_value(
        std::env::var("TAGPLAYER_LOG_MODE").ok().as_deref(),
    ))
}

fn mode_from_env_value(value: Option<&str>) -> LoggingMode {
    match value {
        Some("development") => LoggingMode::Development,
        Some("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    }
}

/// Create an environment filter with fallback to default level
fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = filter_directives(
        std::env::var("TAGPLAYER_LOG_LEVEL").ok(),
        std::env::var("RUST_LOG").ok(),
        default_level,
    );

    EnvFilter::try_new(&directives).map_err(|_| LoggingError::InvalidFilter(directives))
}

/// Filter precedence: `TAGPLAYER_LOG_LEVEL`, then `RUST_LOG`, then `default_level`
fn filter_directives(
    tagplayer_level: Option<String>,
    rust_log: Option<String>,
    default_level: &str,
) -> String {
    tagplayer_level
        .or(rust_log)
        .unwrap_or_else(|| default_level.to_string())
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}
