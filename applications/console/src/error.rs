//! Console error types

use thiserror::Error;

/// Result type for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Console errors
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Library cache failure
    #[error("Library error: {0}")]
    Catalog(#[from] voxplay_catalog::CatalogError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}
