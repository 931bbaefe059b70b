//! Sample template loading and marker expansion.

use std::{fs, io::ErrorKind, path::Path};

use crate::error::AppError;

/// Text of a sample env file, read-only input to the bootstrap.
#[derive(Debug, Clone)]
pub struct EnvTemplate {
    content: String,
}

/// Result of expanding a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub content: String,
    /// `false` when the marker was absent and `content` equals the template.
    pub marker_found: bool,
    /// Occurrences of the marker in the template; only the first is expanded.
    pub occurrences: usize,
}

impl EnvTemplate {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| AppError::MissingTemplate {
            path: path.to_path_buf(),
            reason: match e.kind() {
                ErrorKind::NotFound => "file not found".to_string(),
                _ => format!("cannot read: {e}"),
            },
        })?;
        Ok(Self { content })
    }

    #[cfg(test)]
    fn from_text(content: &str) -> Self {
        Self { content: content.to_string() }
    }

    #[cfg(test)]
    fn content(&self) -> &str {
        &self.content
    }

    /// Replace the first `marker` with `marker + value`.
    pub fn expand(&self, marker: &str, value: &str) -> Expansion {
        let occurrences = self.content.matches(marker).count();
        let content = self.content.replacen(marker, &format!("{marker}{value}"), 1);
        Expansion { content, marker_found: occurrences > 0, occurrences }
    }
}
