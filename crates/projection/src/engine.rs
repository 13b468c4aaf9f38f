//! The projection engine trait.

use nalgebra::Vector3;

use crate::error::EngineError;

/// A PROJ-style geodetic projection engine.
///
/// Handles are built once from a specification string and can be reused
/// for any number of transforms. Geographic (`+proj=longlat`) coordinates
/// are exchanged in radians; projected coordinates in the projection's
/// linear units.
pub trait ProjectionEngine {
    /// Opaque, engine-specific transform handle.
    type Handle;

    /// Build a handle from a specification string such as
    /// `+proj=merc +lon_0=0 +a=6378137 +b=6378137 +no_defs` or
    /// `+init=epsg:4326`.
    fn construct(&self, spec: &str) -> Result<Self::Handle, EngineError>;

    /// Transform a coordinate from `source` into `target`.
    fn transform(
        &self,
        source: &Self::Handle,
        target: &Self::Handle,
        coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError>;
}

impl<E: ProjectionEngine + ?Sized> ProjectionEngine for &E {
    type Handle = E::Handle;

    fn construct(&self, spec: &str) -> Result<Self::Handle, EngineError> {
        (**self).construct(spec)
    }

    fn transform(
        &self,
        source: &Self::Handle,
        target: &Self::Handle,
        coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        (**self).transform(source, target, coord)
    }
}
