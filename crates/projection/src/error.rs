//! Error types for the projection engine.

use thiserror::Error;

/// Errors raised while building handles or transforming coordinates.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid projection spec '{spec}': {message}")]
    InvalidSpec { spec: String, message: String },

    #[error("Unknown EPSG code: {0} (the EPSG database covers codes 1-65535)")]
    UnknownEpsg(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("Transform produced a non-finite coordinate ({x}, {y}, {z})")]
    NonFinite { x: f64, y: f64, z: f64 },
}
