//! Spatial reference handling for terrain rasters.
//!
//! This crate turns raster projection metadata into PROJ-style spec strings
//! and converts points between three spaces:
//!
//! - **local**: rendering space centered on the raster, Y inverted
//! - **world**: projected coordinates in the raster's linear units
//! - **spherical**: longitude/latitude in degrees on the body's ellipsoid
//!
//! Rasters that arrive in geographic coordinates are projected once, when
//! their [`CoordinateTransform`] is built: equirectangular for most extents,
//! polar stereographic when the raster reaches past ±85° latitude.
//!
//! # Example
//!
//! ```ignore
//! use terrain_srs::{CoordinateTransform, ProjectionMetadata, Properties};
//!
//! let props = Properties::load("dem.properties")?;
//! let metadata = ProjectionMetadata::from_properties(&props)?;
//! let transform = CoordinateTransform::from_metadata(metadata)?;
//! let lon_lat = transform.try_world_to_spherical(transform.local_to_world(local))?;
//! ```

pub mod codes;
pub mod families;
pub mod metadata;
pub mod params;
pub mod placement;
pub mod properties;
pub mod transform;

pub use codes::{TransformCode, CODE_UNDEFINED, CODE_USER_DEFINED};
pub use families::{family, ProjectionFamily, FAMILIES};
pub use metadata::{ProjectionMetadata, ProjectionState, DEFAULT_LINEAR_UNITS};
pub use params::{PoleLatitude, ProjectionParameters};
pub use placement::{ensure_projected, ProjectionChoice, POLAR_LATITUDE_THRESHOLD};
pub use properties::{keys, Properties, PropertiesFormat};
pub use transform::CoordinateTransform;

pub use srs_common::{Body, BodyRadii, BoundingBox, SrsError, SrsResult};
