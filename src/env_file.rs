//! Output env file writer.
//!
//! Writes are not synchronised: two bootstraps appending to the same file at
//! the same time can interleave. Run one at a time per output path.

use std::{fs::OpenOptions, io::Write, path::Path};

use crate::{config::WriteMode, error::AppError};

/// Write `content` to `path` according to `mode`. Returns the bytes written.
///
/// On unix a file created by this call is opened with mode 0600, since it
/// carries a secret. Existing files keep their permissions.
pub fn write(path: &Path, content: &str, mode: WriteMode) -> Result<usize, AppError> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Replace => options.write(true).truncate(true),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| AppError::Io(with_path(e, "cannot open", path)))?;
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::Io(with_path(e, "cannot write", path)))?;

    Ok(content.len())
}

fn with_path(e: std::io::Error, action: &str, path: &Path) -> std::io::Error {
    std::io::Error::new(e.kind(), format!("{action} {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn append_creates_then_accumulates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        assert_eq!(write(&path, "A=1\n", WriteMode::Append).unwrap(), 4);
        write(&path, "A=1\n", WriteMode::Append).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\nA=1\n");
    }

    #[test]
    fn replace_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "OLD=stale\nOLD=stale\n").unwrap();
        write(&path, "A=1\n", WriteMode::Replace).unwrap();
        write(&path, "A=1\n", WriteMode::Replace).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\n");
    }

    #[test]
    fn missing_parent_dir_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join(".env");
        let err = write(&path, "A=1\n", WriteMode::Append).unwrap_err();
        assert!(err.to_string().contains("no-such-dir"));
    }

    #[cfg(unix)]
    #[test]
    fn created_file_mode_is_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        write(&path, "A=1\n", WriteMode::Append).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_file_mode_is_kept() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        write(&path, "A=1\n", WriteMode::Append).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn replace_created_file_mode_is_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        write(&path, "A=1\n", WriteMode::Replace).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
