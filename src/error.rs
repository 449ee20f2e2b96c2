use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse image metadata: {0}")]
    Parse(String),

    #[error("Failed to decode background image: {0}")]
    Decode(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write desktop settings: {0}")]
    Permission(String),

    #[error("Wallpaper change notification failed: {0}")]
    Notify(String),

    #[error("Setting the desktop background is only supported on Windows")]
    Unsupported,
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
