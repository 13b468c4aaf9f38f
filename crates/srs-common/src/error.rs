//! Error types for the terrain spatial-reference crates.

use thiserror::Error;

/// Result type alias using SrsError.
pub type SrsResult<T> = Result<T, SrsError>;

/// Primary error type for projection metadata and coordinate transforms.
#[derive(Debug, Error)]
pub enum SrsError {
    // === Placement Errors ===
    #[error("Unable to define projection: {0}")]
    ProjectionUndefined(String),

    #[error("Projection failed: {0}")]
    ProjectionFailed(String),

    #[error("Unknown celestial body '{0}' and no explicit ellipsoid axes")]
    UnknownBody(String),

    // === Metadata Errors ===
    #[error("Missing required property: {0}")]
    MissingProperty(String),

    #[error("Invalid value for property '{key}': {message}")]
    InvalidProperty { key: String, message: String },

    // === File Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SrsError {
    /// True for errors that leave a raster without any valid placement.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SrsError::ProjectionUndefined(_)
                | SrsError::ProjectionFailed(_)
                | SrsError::UnknownBody(_)
        )
    }
}

impl From<serde_json::Error> for SrsError {
    fn from(err: serde_json::Error) -> Self {
        SrsError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for SrsError {
    fn from(err: serde_yaml::Error) -> Self {
        SrsError::Serialization(format!("YAML error: {}", err))
    }
}
