//! Projection engine backed by the PROJ C library through the `proj` crate.
//!
//! This is the default engine: PROJ implements every projection family the
//! terrain crates emit. `+init=epsg:<code>` references are expanded the same
//! way as for [`crate::Proj4Engine`] before PROJ sees them.
//!
//! Geographic (`+proj=longlat`) specs need no PROJ object. A transform goes
//! through longitude/latitude: inverse-project out of the source, then
//! forward-project into the target. Both handles are assumed to share a
//! datum; no datum shift is applied.

use nalgebra::Vector3;
use proj::Proj;
use tracing::debug;

use crate::engine::ProjectionEngine;
use crate::error::EngineError;
use crate::proj4::resolve_spec;
use crate::spec::ProjSpec;

/// PROJ engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjEngine;

enum Kind {
    Geographic,
    Projected(Proj),
}

/// A built PROJ projection plus the spec it came from.
pub struct ProjHandle {
    spec: String,
    kind: Kind,
}

impl std::fmt::Debug for ProjHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjHandle")
            .field("spec", &self.spec)
            .field("geographic", &self.is_geographic())
            .finish()
    }
}

impl ProjHandle {
    /// The fully resolved spec string this handle was built from.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self.kind, Kind::Geographic)
    }

    /// Projected (x, y) to longitude/latitude in radians.
    fn inverse(&self, xy: (f64, f64)) -> Result<(f64, f64), EngineError> {
        match &self.kind {
            Kind::Geographic => Ok(xy),
            Kind::Projected(proj) => proj
                .project(xy, true)
                .map_err(|e| EngineError::TransformFailed(format!("{} inverse: {}", self.spec, e))),
        }
    }

    /// Longitude/latitude in radians to projected (x, y).
    fn forward(&self, lon_lat: (f64, f64)) -> Result<(f64, f64), EngineError> {
        match &self.kind {
            Kind::Geographic => Ok(lon_lat),
            Kind::Projected(proj) => proj
                .project(lon_lat, false)
                .map_err(|e| EngineError::TransformFailed(format!("{} forward: {}", self.spec, e))),
        }
    }
}

impl ProjEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectionEngine for ProjEngine {
    type Handle = ProjHandle;

    fn construct(&self, spec: &str) -> Result<ProjHandle, EngineError> {
        let resolved = resolve_spec(spec)?;
        let kind = if ProjSpec::parse(&resolved).is_geographic() {
            Kind::Geographic
        } else {
            let proj = Proj::new(&resolved).map_err(|e| EngineError::InvalidSpec {
                spec: resolved.clone(),
                message: e.to_string(),
            })?;
            Kind::Projected(proj)
        };
        debug!(spec = %resolved, "Built PROJ handle");
        Ok(ProjHandle {
            spec: resolved,
            kind,
        })
    }

    fn transform(
        &self,
        source: &ProjHandle,
        target: &ProjHandle,
        coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        let lon_lat = source.inverse((coord.x, coord.y))?;
        let (x, y) = target.forward(lon_lat)?;
        if !x.is_finite() || !y.is_finite() {
            return Err(EngineError::NonFinite { x, y, z: coord.z });
        }
        Ok(Vector3::new(x, y, coord.z))
    }
}
