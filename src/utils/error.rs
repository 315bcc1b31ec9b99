//! Error types for the asset generator.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File path errors raised while preparing a run.
#[derive(Error, Debug)]
pub enum PathError {
    /// Directory could not be listed
    #[error("Cannot read directory {path}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },
    /// Output folder could not be removed or created
    #[error("Cannot prepare output folder {path}: {source}")]
    Prepare { path: PathBuf, source: io::Error },
}

/// Main error type for the asset generator.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Platform name is neither `ios` nor `android`
    #[error("Your platform({0}) is not available.")]
    UnsupportedPlatform(String),

    /// Filesystem error while scanning or preparing folders
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Rasterizing a single source/variant pair failed
    #[error("Render error: {0}")]
    Render(String),

    /// A worker task panicked or was torn down
    #[error("Worker error: {0}")]
    Worker(String),

    /// Plain IO error
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for generator operations.
pub type AssetResult<T> = Result<T, AssetError>;

// Helper methods for error creation
impl AssetError {
    pub fn render<T: Into<String>>(msg: T) -> Self {
        Self::Render(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }
}

impl PathError {
    pub fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadDir { path: path.into(), source }
    }

    pub fn prepare(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Prepare { path: path.into(), source }
    }
}

// Convert std::io::Error to AssetError
impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Join failures surface as worker errors
impl From<tokio::task::JoinError> for AssetError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Worker(format!("Task failed to complete: {}", err))
    }
}
