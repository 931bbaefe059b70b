//! Diagnostics via tracing-subscriber.
//!
//! The configured level (`--log-level`, `ENVBOOT_LOG_LEVEL`, `[log].level`) is
//! the only filter; `RUST_LOG` is not consulted. Events go to stderr so stdout
//! carries only the operator report, and colour is used only when stderr is a
//! terminal.

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;

use crate::error::AppError;

/// Install the global subscriber at `level`.
///
/// Fails without installing anything if `level` is not a plain level name.
pub fn init(level: &str) -> Result<(), AppError> {
    let max_level = parse_level(level)?;

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Parse a log level string into a [`LevelFilter`], returning an error on
/// unrecognised values.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_levels_parse() {
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn invalid_level_errors() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
        assert!(parse_level("envboot=debug").is_err());
    }

    #[test]
    fn init_rejects_unknown_level() {
        let err = init("verbose").unwrap_err();
        assert!(err.to_string().contains("unrecognised log level: 'verbose'"));
    }

    // The only test in this binary that installs a subscriber.
    #[test]
    fn init_caps_at_configured_level() {
        init("warn").unwrap();
        assert!(tracing::enabled!(tracing::Level::WARN));
        assert!(!tracing::enabled!(tracing::Level::INFO));
    }
}
