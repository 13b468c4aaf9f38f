//! Common types shared across the terrain spatial-reference crates.

pub mod bbox;
pub mod body;
pub mod error;

pub use bbox::BoundingBox;
pub use body::{Body, BodyRadii};
pub use error::{SrsError, SrsResult};
