//! Provides utility functions for file system operations of the command-line
//! front end: validating artifact locators and opening the log file.

use std::fs::{File, OpenOptions};
use std::io::Error as IoError;
use std::path::Path;

use super::error::AppError;
use super::verbose_eprintln;

/// Validates that `artifact_path` can name a Python module or package.
///
/// The path must exist. A file must carry the `.py` extension; a directory
/// is taken as a package.
///
/// # Arguments
/// * `artifact_path` - The module file or package directory to check.
/// * `quiet_mode` - Suppresses the verbose error message if true.
///
/// # Errors
/// Returns `AppError::InvalidPath` describing the first problem found.
pub fn validate_artifact_path(artifact_path: &Path, quiet_mode: bool) -> Result<(), AppError> {
    if !artifact_path.exists() {
        let error_msg = format!("Path not found: {}", artifact_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if artifact_path.is_file() && artifact_path.extension().and_then(|e| e.to_str()) != Some("py") {
        let error_msg = format!("Not a Python file: {}", artifact_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    Ok(())
}

/// Opens the log file, truncating any previous contents.
///
/// # Arguments
/// * `file_path` - The `Path` given with `--log-file`.
///
/// # Errors
/// Returns an `IoError` if the file cannot be opened or created.
///
/// # I/O
/// The `File` is returned unbuffered. The `tracing` writer takes a lock per
/// event, so each event reaches the file as soon as it is formatted.
pub fn init_log_writer(file_path: &Path) -> Result<File, IoError> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn accepts_python_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("mod.py");
        fs::write(&file, "").unwrap();
        assert!(validate_artifact_path(&file, true).is_ok());
        assert!(validate_artifact_path(dir.path(), true).is_ok());
    }

    #[test]
    fn rejects_missing_paths_and_other_files() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("notes.txt");
        fs::write(&text, "").unwrap();
        assert!(matches!(
            validate_artifact_path(&text, true),
            Err(AppError::InvalidPath(_))
        ));
        assert!(matches!(
            validate_artifact_path(&dir.path().join("absent.py"), true),
            Err(AppError::InvalidPath(_))
        ));
    }
}
