//! Conversions between local, world and spherical coordinates.
//!
//! - Local: rendering space centered on the raster's midpoint, Y inverted.
//! - World: the raster's projected coordinates, in its linear units.
//! - Spherical: longitude/latitude in degrees on the body's ellipsoid.

use nalgebra::{Vector2, Vector3};
use projection::{DefaultEngine, EngineError, ProjectionEngine};
use srs_common::{SrsError, SrsResult};
use std::fmt;
use tracing::{debug, info, warn};

use crate::metadata::ProjectionMetadata;
use crate::placement::ensure_projected;

/// Engine handles for both ends of a spherical conversion.
struct EngineHandles<H> {
    projected: H,
    geographic: H,
}

/// Coordinate conversions for one raster.
///
/// Construction projects unprojected rasters, fixes the spec strings and
/// builds both engine handles, so a spec the engine cannot handle fails
/// here rather than on every later conversion. The handles are kept for the
/// transform's lifetime and never shared with another transform.
pub struct CoordinateTransform<E: ProjectionEngine = DefaultEngine> {
    metadata: ProjectionMetadata,
    engine: E,
    projected_spec: String,
    geographic_spec: String,
    physical_width: f64,
    physical_length: f64,
    handles: EngineHandles<E::Handle>,
}

impl CoordinateTransform<DefaultEngine> {
    /// Transform backed by the default PROJ engine.
    pub fn from_metadata(metadata: ProjectionMetadata) -> SrsResult<Self> {
        Self::new(metadata, DefaultEngine::default())
    }
}

impl<E: ProjectionEngine> CoordinateTransform<E> {
    /// Build a transform, projecting the raster first if needed.
    ///
    /// Fails when no projection spec can be derived, when the body is unknown
    /// and no axes are given, or when the engine cannot build a handle or
    /// project the raster.
    pub fn new(mut metadata: ProjectionMetadata, engine: E) -> SrsResult<Self> {
        ensure_projected(&mut metadata, &engine)?;

        let projected_spec = metadata.require_projection_spec()?.to_string();
        let geographic_spec = metadata.geographic_spec()?.to_string();
        let scale = metadata.scale();
        let physical_width = metadata.raster_width() as f64 * scale.x;
        let physical_length = metadata.raster_length() as f64 * scale.y;

        let handles = EngineHandles {
            projected: engine.construct(&projected_spec).map_err(engine_failure)?,
            geographic: engine.construct(&geographic_spec).map_err(engine_failure)?,
        };
        debug!(
            projected = %projected_spec,
            geographic = %geographic_spec,
            "Built engine handles"
        );

        info!(
            projection = %projected_spec,
            globe = ?metadata.globe_name(),
            width = physical_width,
            length = physical_length,
            "Coordinate transform ready"
        );

        Ok(Self {
            metadata,
            engine,
            projected_spec,
            geographic_spec,
            physical_width,
            physical_length,
            handles,
        })
    }

    fn local_offset(&self) -> Vector3<f64> {
        let tie = self.metadata.tie_point();
        Vector3::new(
            self.physical_width / 2.0 + tie.x,
            -self.physical_length / 2.0 + tie.y,
            tie.z,
        )
    }

    /// Local to world.
    pub fn local_to_world(&self, local: Vector3<f64>) -> Vector3<f64> {
        local + self.local_offset()
    }

    /// World to local.
    pub fn world_to_local(&self, world: Vector3<f64>) -> Vector3<f64> {
        world - self.local_offset()
    }

    pub fn local_to_world_2d(&self, local: Vector2<f64>) -> Vector2<f64> {
        local + self.local_offset().xy()
    }

    pub fn world_to_local_2d(&self, world: Vector2<f64>) -> Vector2<f64> {
        world - self.local_offset().xy()
    }

    /// World to longitude/latitude in degrees. Z passes through.
    pub fn try_world_to_spherical(&self, world: Vector3<f64>) -> SrsResult<Vector3<f64>> {
        let handles = &self.handles;
        let out = self
            .engine
            .transform(&handles.projected, &handles.geographic, world)
            .map_err(engine_failure)?;
        Ok(Vector3::new(out.x.to_degrees(), out.y.to_degrees(), world.z))
    }

    /// Longitude/latitude in degrees to world. Z passes through.
    pub fn try_spherical_to_world(&self, spherical: Vector3<f64>) -> SrsResult<Vector3<f64>> {
        let handles = &self.handles;
        let radians = Vector3::new(
            spherical.x.to_radians(),
            spherical.y.to_radians(),
            spherical.z,
        );
        let out = self
            .engine
            .transform(&handles.geographic, &handles.projected, radians)
            .map_err(engine_failure)?;
        Ok(Vector3::new(out.x, out.y, spherical.z))
    }

    /// Convert `coord` from world to spherical in place.
    ///
    /// On failure the error is logged, `coord` is left as it was and `false`
    /// is returned.
    pub fn world_to_spherical(&self, coord: &mut Vector3<f64>) -> bool {
        match self.try_world_to_spherical(*coord) {
            Ok(converted) => {
                *coord = converted;
                true
            }
            Err(e) => {
                warn!(x = coord.x, y = coord.y, error = %e, "World to spherical conversion failed");
                false
            }
        }
    }

    /// Convert `coord` from spherical to world in place.
    ///
    /// On failure the error is logged, `coord` is left as it was and `false`
    /// is returned.
    pub fn spherical_to_world(&self, coord: &mut Vector3<f64>) -> bool {
        match self.try_spherical_to_world(*coord) {
            Ok(converted) => {
                *coord = converted;
                true
            }
            Err(e) => {
                warn!(lon = coord.x, lat = coord.y, error = %e, "Spherical to world conversion failed");
                false
            }
        }
    }

    pub fn metadata(&self) -> &ProjectionMetadata {
        &self.metadata
    }

    /// Give back the metadata, including any placement derived at construction.
    pub fn into_metadata(self) -> ProjectionMetadata {
        self.metadata
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn tie_point(&self) -> Vector3<f64> {
        self.metadata.tie_point()
    }

    pub fn scale(&self) -> Vector3<f64> {
        self.metadata.scale()
    }

    /// Raster extent in world units as (width, length).
    pub fn physical_size(&self) -> (f64, f64) {
        (self.physical_width, self.physical_length)
    }

    pub fn projected_spec(&self) -> &str {
        &self.projected_spec
    }

    pub fn geographic_spec(&self) -> &str {
        &self.geographic_spec
    }

    pub fn transform_name(&self) -> &'static str {
        self.metadata.transform_name()
    }

    pub fn globe_name(&self) -> Option<&str> {
        self.metadata.globe_name()
    }
}

impl<E: ProjectionEngine> fmt::Debug for CoordinateTransform<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateTransform")
            .field("projected_spec", &self.projected_spec)
            .field("geographic_spec", &self.geographic_spec)
            .field("physical_width", &self.physical_width)
            .field("physical_length", &self.physical_length)
            .finish()
    }
}

fn engine_failure(e: EngineError) -> SrsError {
    SrsError::ProjectionFailed(e.to_string())
}
