//! Automatic projection of geographic rasters.
//!
//! A raster that arrives in plain longitude/latitude gets a projection chosen
//! from its latitude extent, and its tie point and scale are re-derived in
//! the chosen projection's units.

use nalgebra::Vector3;
use projection::ProjectionEngine;
use srs_common::{BoundingBox, SrsError, SrsResult};
use tracing::{debug, info};

use crate::codes::TransformCode;
use crate::metadata::ProjectionMetadata;
use crate::params::PoleLatitude;

/// Latitude (degrees) beyond which a raster is projected polar stereographic.
pub const POLAR_LATITUDE_THRESHOLD: f64 = 85.0;

/// Projection picked for an unprojected raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionChoice {
    PolarStereographic(PoleLatitude),
    Equirectangular,
}

impl ProjectionChoice {
    /// Choose from geographic bounds. The southern test wins when a raster
    /// reaches past both thresholds.
    pub fn for_bounds(bounds: &BoundingBox) -> Self {
        if bounds.min_y < -POLAR_LATITUDE_THRESHOLD {
            ProjectionChoice::PolarStereographic(PoleLatitude::South)
        } else if bounds.max_y > POLAR_LATITUDE_THRESHOLD {
            ProjectionChoice::PolarStereographic(PoleLatitude::North)
        } else {
            ProjectionChoice::Equirectangular
        }
    }

    pub fn transform_code(&self) -> TransformCode {
        match self {
            ProjectionChoice::PolarStereographic(_) => TransformCode::PolarStereographic,
            ProjectionChoice::Equirectangular => TransformCode::Equirectangular,
        }
    }
}

/// Project an unprojected raster in place.
///
/// Does nothing and returns `None` when the metadata is already projected.
/// Otherwise picks a projection, forward-projects the upper-left and
/// lower-right corners through `engine` and stores the resulting placement.
/// The choice is worked out on a copy; on any error `metadata` is left
/// exactly as it was and the error is returned.
pub fn ensure_projected<E: ProjectionEngine>(
    metadata: &mut ProjectionMetadata,
    engine: &E,
) -> SrsResult<Option<ProjectionChoice>> {
    if metadata.is_projected() {
        return Ok(None);
    }
    if metadata.raster_width() == 0 || metadata.raster_length() == 0 {
        return Err(SrsError::ProjectionFailed(format!(
            "raster has no extent ({}x{})",
            metadata.raster_width(),
            metadata.raster_length()
        )));
    }

    let mut staged = metadata.clone();
    let bounds = staged.bounds();
    let (center_lon, center_lat) = bounds.center();
    staged.params.center_lon.get_or_insert(center_lon);
    staged.params.center_lat.get_or_insert(center_lat);

    let choice = ProjectionChoice::for_bounds(&bounds);
    staged.transform_code = choice.transform_code();
    if let ProjectionChoice::PolarStereographic(pole) = choice {
        staged.params.pole_latitude = pole;
        staged.params.scale_at_natural_origin = Some(1.0);
    }
    staged.params.false_easting = Some(0.0);
    staged.params.false_northing = Some(0.0);

    let geographic = staged.geographic_spec()?.to_string();
    let projected = staged
        .build_projection_spec()?
        .ok_or_else(|| {
            SrsError::ProjectionUndefined(format!(
                "no spec for {}",
                staged.transform_code.name()
            ))
        })?
        .to_string();
    debug!(source = %geographic, target = %projected, "Auto-projecting raster");

    let failed = |e: projection::EngineError| SrsError::ProjectionFailed(e.to_string());
    let source = engine.construct(&geographic).map_err(failed)?;
    let target = engine.construct(&projected).map_err(failed)?;
    let forward = |(lon, lat): (f64, f64)| {
        engine
            .transform(
                &source,
                &target,
                Vector3::new(lon.to_radians(), lat.to_radians(), 0.0),
            )
            .map_err(failed)
    };
    let upper_left = forward(bounds.upper_left())?;
    let lower_right = forward(bounds.lower_right())?;

    let extent = BoundingBox::from_points(
        (upper_left.x, upper_left.y),
        (lower_right.x, lower_right.y),
    );
    let tie_point = Vector3::new(upper_left.x, upper_left.y, staged.tie_point().z);
    let scale = Vector3::new(
        extent.width() / staged.raster_width() as f64,
        extent.height() / staged.raster_length() as f64,
        staged.scale().z,
    );
    staged.mark_projected(tie_point, scale);
    *metadata = staged;

    info!(
        projection = choice.transform_code().name(),
        spec = %projected,
        tie_x = tie_point.x,
        tie_y = tie_point.y,
        scale_x = scale.x,
        scale_y = scale.y,
        "Raster auto-projected"
    );
    Ok(Some(choice))
}
