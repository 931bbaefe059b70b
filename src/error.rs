//! Application-wide error types.

use std::path::PathBuf;

use thiserror::Error;

/// Expected layout of the key-pair file, quoted in error messages.
pub const KEY_FILE_FORMAT: &str =
    "line 1 'Verification Key (Address): <value>', line 2 'Full Private Key: <value>'";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("key file {}: {reason} (expected {})", .path.display(), KEY_FILE_FORMAT)]
    MissingKeyFile { path: PathBuf, reason: String },

    #[error("key file {} line {line}: {reason} (expected {})", .path.display(), KEY_FILE_FORMAT)]
    MalformedKeyFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("template {}: {reason} (expected a text file containing the marker)", .path.display())]
    MissingTemplate { path: PathBuf, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn missing_key_file_names_path_and_format() {
        let e = AppError::MissingKeyFile {
            path: PathBuf::from("keys.txt"),
            reason: "file not found".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("keys.txt"));
        assert!(msg.contains("file not found"));
        assert!(msg.contains("Full Private Key"));
    }

    #[test]
    fn malformed_key_file_names_line() {
        let e = AppError::MalformedKeyFile {
            path: PathBuf::from("keys.txt"),
            line: 2,
            reason: "empty value".into(),
        };
        assert!(e.to_string().contains("line 2"));
    }

    #[test]
    fn missing_template_names_path() {
        let e = AppError::MissingTemplate {
            path: PathBuf::from(".env.sample"),
            reason: "file not found".into(),
        };
        assert!(e.to_string().contains(".env.sample"));
    }

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
