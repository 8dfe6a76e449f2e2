//! Error types for catalog synchronisation.

use polo_catalog::ParseError;
use polo_common_fs::FsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure reported by an [`Extractor`](crate::Extractor).
#[derive(Debug, Error)]
#[error("cannot extract messages from {}: {message}", .path.display())]
pub struct ExtractError {
    pub path: PathBuf,
    pub message: String,
}

impl ExtractError {
    pub fn new(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

/// Errors raised while updating or loading catalogs.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Result type for synchronisation operations.
pub type Result<T> = std::result::Result<T, SyncError>;
