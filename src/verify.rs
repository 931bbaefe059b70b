//! Post-write sanity check of the output env file.

use std::path::Path;

use tracing::{debug, warn};

/// What a dotenv parser makes of the written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub entries: usize,
    /// Whether `key` is defined with a non-empty value.
    pub key_defined: bool,
}

/// Parse `path` as a dotenv file and look for `key`.
///
/// Returns `None` if the file does not parse; that is logged and otherwise
/// ignored, since templates may carry lines dotenv rejects.
pub fn inspect(path: &Path, key: &str) -> Option<OutputSummary> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open output for inspection");
            return None;
        }
    };

    let mut summary = OutputSummary { entries: 0, key_defined: false };
    for item in iter {
        match item {
            Ok((name, value)) => {
                summary.entries += 1;
                if name == key && !value.is_empty() {
                    summary.key_defined = true;
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "output is not valid dotenv syntax");
                return None;
            }
        }
    }

    debug!(
        path = %path.display(),
        entries = summary.entries,
        key,
        key_defined = summary.key_defined,
        "output inspected"
    );
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn counts_entries_and_finds_key() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "# node\nPORT=80\nPRIVATE_KEY=XYZ\n").unwrap();
        let summary = inspect(&path, "PRIVATE_KEY").unwrap();
        assert_eq!(summary, OutputSummary { entries: 2, key_defined: true });
    }

    #[test]
    fn empty_value_is_not_defined() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "PRIVATE_KEY=\n").unwrap();
        let summary = inspect(&path, "PRIVATE_KEY").unwrap();
        assert!(!summary.key_defined);
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(inspect(&tmp.path().join(".env"), "PRIVATE_KEY").is_none());
    }
}
