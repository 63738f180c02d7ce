use pyapi_semver::SemverError;
use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Semver(#[from] SemverError),
    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),
    #[error("Failed to initialize logging: {0}")]
    Logger(String),
}
