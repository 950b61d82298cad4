//! Error types for shadow grid setup

use thiserror::Error;

/// Shadow grid errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShadowError {
    /// Cell spacing or sample counts cannot describe a grid
    #[error("Invalid grid dimension: {0}")]
    InvalidDimension(String),
}

/// Result type for shadow grid operations
pub type Result<T> = std::result::Result<T, ShadowError>;
