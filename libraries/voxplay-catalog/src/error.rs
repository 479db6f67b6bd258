//! Error types for the library cache

use std::path::PathBuf;
use thiserror::Error;
use voxplay_core::VoxError;

/// Library cache errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading or writing a cache file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A cache file is not valid library JSON
    #[error("Invalid library JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The cache directory has no library dump
    #[error("Library cache not found: {}", .0.display())]
    MissingCache(PathBuf),
}

/// Result type for library cache operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for VoxError {
    fn from(err: CatalogError) -> Self {
        VoxError::catalog(err.to_string())
    }
}
