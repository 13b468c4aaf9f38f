//! Projection engine backed by `proj4rs`.
//!
//! `proj4rs` does not read `+init=` files, so `+init=epsg:<code>` references
//! are expanded to their PROJ.4 definition through the `crs-definitions`
//! database before a handle is built.

use nalgebra::Vector3;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use tracing::debug;

use crate::engine::ProjectionEngine;
use crate::error::EngineError;
use crate::spec::ProjSpec;

/// Pure-Rust PROJ.4 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Proj4Engine;

/// A built `proj4rs` projection plus the spec it came from.
pub struct Proj4Handle {
    spec: String,
    proj: Proj,
}

impl std::fmt::Debug for Proj4Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proj4Handle").field("spec", &self.spec).finish()
    }
}

impl Proj4Handle {
    /// The fully resolved spec string this handle was built from.
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

impl Proj4Engine {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectionEngine for Proj4Engine {
    type Handle = Proj4Handle;

    fn construct(&self, spec: &str) -> Result<Proj4Handle, EngineError> {
        let resolved = resolve_spec(spec)?;
        let proj = Proj::from_proj_string(&resolved).map_err(|e| EngineError::InvalidSpec {
            spec: resolved.clone(),
            message: format!("{:?}", e),
        })?;
        debug!(spec = %resolved, "Built projection handle");
        Ok(Proj4Handle {
            spec: resolved,
            proj,
        })
    }

    fn transform(
        &self,
        source: &Proj4Handle,
        target: &Proj4Handle,
        coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        let mut point = (coord.x, coord.y, coord.z);
        transform(&source.proj, &target.proj, &mut point).map_err(|e| {
            EngineError::TransformFailed(format!(
                "{} -> {}: {:?}",
                source.spec, target.spec, e
            ))
        })?;

        let (x, y, z) = point;
        if !x.is_finite() || !y.is_finite() || !z.is_finite() {
            return Err(EngineError::NonFinite { x, y, z });
        }
        Ok(Vector3::new(x, y, z))
    }
}

/// Expand a `+init=epsg:<code>` reference into its PROJ.4 definition.
///
/// Specs without an `+init` token are returned unchanged. Any tokens that
/// follow the reference are appended after the expanded definition.
///
/// The `crs-definitions` database is keyed by `u16`, so codes above 65535
/// (ESRI codes such as 102100, or 900913) are reported as
/// [`EngineError::UnknownEpsg`] even though they are valid elsewhere.
pub fn resolve_spec(spec: &str) -> Result<String, EngineError> {
    let parsed = ProjSpec::parse(spec);
    let Some(code) = parsed.epsg_code() else {
        return Ok(spec.trim().to_string());
    };

    let definition = code
        .parse::<u16>()
        .ok()
        .and_then(crs_definitions::from_code)
        .map(|def| def.proj4)
        .ok_or_else(|| EngineError::UnknownEpsg(code.to_string()))?;

    let rest: Vec<&str> = spec
        .split_whitespace()
        .filter(|token| !token.trim_start_matches('+').starts_with("init="))
        .collect();

    if rest.is_empty() {
        Ok(definition.to_string())
    } else {
        Ok(format!("{} {}", definition, rest.join(" ")))
    }
}
