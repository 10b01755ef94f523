use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Hash failed for {path}: {message}")]
    Hash { path: PathBuf, message: String },

    #[error("Trash facility unavailable: {0}. Refusing to delete; use --permanent to remove files irrecoverably")]
    TrashUnavailable(String),

    #[error("User input error: {0}")]
    UserInput(String),
}

impl From<dialoguer::Error> for ScrubError {
    fn from(err: dialoguer::Error) -> Self {
        ScrubError::UserInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrubError>;
