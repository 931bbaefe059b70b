//! Key-pair file parsing.
//!
//! The file is produced by an external key generator and holds two labelled
//! lines:
//! ```text
//! Verification Key (Address): <public key>
//! Full Private Key: <private key>
//! ```
//! The generator's own output labels (`Public Key (Address)` / `Private Key`)
//! are accepted as well. Lines after the second are ignored.

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::AppError;

/// Labels accepted on line 1.
const PUBLIC_LABELS: &[&str] = &["Verification Key (Address)", "Public Key (Address)"];
/// Labels accepted on line 2.
const PRIVATE_LABELS: &[&str] = &["Full Private Key", "Private Key"];

const SEPARATOR: &str = ": ";

/// The two values read from a key-pair file.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPairRecord {
    verification_key: String,
    full_private_key: String,
}

impl KeyPairRecord {
    /// Public key / address. The only source for the displayed public key.
    pub fn verification_key(&self) -> &str {
        &self.verification_key
    }

    pub fn full_private_key(&self) -> &str {
        &self.full_private_key
    }

    /// Read and parse the key-pair file at `path`.
    ///
    /// An absent, unreadable, or short (fewer than two lines) file is
    /// [`AppError::MissingKeyFile`]; a badly labelled line is
    /// [`AppError::MalformedKeyFile`].
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| AppError::MissingKeyFile {
            path: path.to_path_buf(),
            reason: match e.kind() {
                ErrorKind::NotFound => "file not found".to_string(),
                _ => format!("cannot read: {e}"),
            },
        })?;
        Self::parse_at(path, &text)
    }

    #[cfg(test)]
    fn parse(text: &str) -> Result<Self, AppError> {
        Self::parse_at(Path::new("<input>"), text)
    }

    fn parse_at(path: &Path, text: &str) -> Result<Self, AppError> {
        let mut lines = text.lines();
        let (Some(first), Some(second)) = (lines.next(), lines.next()) else {
            let found = text.lines().count();
            return Err(AppError::MissingKeyFile {
                path: path.to_path_buf(),
                reason: format!("expected at least 2 lines, found {found}"),
            });
        };

        Ok(Self {
            verification_key: field(path, 1, first, PUBLIC_LABELS)?,
            full_private_key: field(path, 2, second, PRIVATE_LABELS)?,
        })
    }
}

impl fmt::Debug for KeyPairRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairRecord")
            .field("verification_key", &self.verification_key)
            .field("full_private_key", &"<redacted>")
            .finish()
    }
}

/// Split `line` into `label: value`, check the label, return the trimmed value.
fn field(path: &Path, line_no: usize, line: &str, labels: &[&str]) -> Result<String, AppError> {
    let malformed = |reason: String| AppError::MalformedKeyFile {
        path: PathBuf::from(path),
        line: line_no,
        reason,
    };

    let (label, value) = line
        .split_once(SEPARATOR)
        .ok_or_else(|| malformed("missing 'label: value' separator".into()))?;

    let label = label.trim();
    if !labels.contains(&label) {
        return Err(malformed(format!(
            "unexpected label '{label}', expected one of {}",
            labels.iter().map(|l| format!("'{l}'")).collect::<Vec<_>>().join(", ")
        )));
    }

    let value = value.trim();
    if value.is_empty() {
        return Err(malformed(format!("empty value for '{label}'")));
    }
    Ok(value.to_string())
}
