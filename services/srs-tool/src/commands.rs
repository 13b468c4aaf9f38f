//! Subcommand implementations.

use anyhow::{Context, Result};
use clap::ValueEnum;
use nalgebra::Vector3;
use std::fmt::Write as _;
use std::path::Path;
use terrain_srs::{keys, CoordinateTransform, ProjectionMetadata, Properties};
use tracing::{info, warn};

/// Coordinate spaces accepted by `convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Space {
    /// Rendering space centered on the raster
    Local,
    /// Projected coordinates in linear units
    World,
    /// Longitude/latitude in degrees
    Spherical,
}

/// Read a metadata file and fill in the globe if it has none.
pub fn load_metadata(path: &Path, default_globe: &str) -> Result<ProjectionMetadata> {
    let props = Properties::load(path)
        .with_context(|| format!("Failed to read metadata from {}", path.display()))?;
    let mut metadata = ProjectionMetadata::from_properties(&props)
        .with_context(|| format!("Invalid metadata in {}", path.display()))?;
    if metadata.globe.is_none() {
        warn!(path = %path.display(), globe = default_globe, "No globe in metadata, using default");
        metadata.globe = Some(default_globe.to_string());
    }
    Ok(metadata)
}

/// Summarize a metadata file.
pub fn info(path: &Path, default_globe: &str) -> Result<String> {
    let mut metadata = load_metadata(path, default_globe)?;
    let mut out = metadata.to_string();

    let projection = if metadata.is_projected() {
        metadata
            .build_projection_spec()?
            .map(|spec| spec.to_string())
            .unwrap_or_else(|| "(undefined)".to_string())
    } else {
        "(chosen when projected)".to_string()
    };
    writeln!(out, "Projection spec: {}", projection)?;
    writeln!(out, "Geographic spec: {}", metadata.geographic_spec()?)?;
    writeln!(out, "Bounds: {}", metadata.bounds())?;

    if metadata.is_projected() {
        let resolution = metadata.map_resolution_degrees_per_pixel()?;
        writeln!(
            out,
            "Approximate resolution: {:.9} x {:.9} degrees/pixel",
            resolution.x, resolution.y
        )?;
    }
    Ok(out)
}

/// Project a metadata file and save the new placement.
///
/// Writes to `output` when given, otherwise back to `path`. Keys outside the
/// projection block are carried over unchanged.
pub fn project(
    path: &Path,
    output: Option<&Path>,
    default_globe: &str,
) -> Result<ProjectionMetadata> {
    let metadata = load_metadata(path, default_globe)?;
    let was_projected = metadata.is_projected();

    let transform = CoordinateTransform::from_metadata(metadata)
        .with_context(|| format!("Unable to place raster from {}", path.display()))?;
    info!(
        projection = transform.transform_name(),
        spec = transform.projected_spec(),
        "Raster placed"
    );
    let metadata = transform.into_metadata();

    let mut props = Properties::load(path)?;
    let stale: Vec<String> = props
        .iter()
        .filter(|(key, _)| key.starts_with(keys::PREFIX))
        .map(|(key, _)| key.to_string())
        .collect();
    for key in stale {
        props.remove(&key);
    }
    for (key, value) in metadata.to_properties(default_globe).iter() {
        props.set(key, value);
    }

    let target = output.unwrap_or(path);
    props
        .save(target)
        .with_context(|| format!("Failed to write metadata to {}", target.display()))?;
    info!(
        path = %target.display(),
        already_projected = was_projected,
        "Saved metadata"
    );
    Ok(metadata)
}

/// Convert a coordinate between two spaces of a raster.
pub fn convert(
    path: &Path,
    from: Space,
    to: Space,
    coord: Vector3<f64>,
    default_globe: &str,
) -> Result<Vector3<f64>> {
    let metadata = load_metadata(path, default_globe)?;
    let transform = CoordinateTransform::from_metadata(metadata)?;

    let world = match from {
        Space::Local => transform.local_to_world(coord),
        Space::World => coord,
        Space::Spherical => transform.try_spherical_to_world(coord)?,
    };
    let converted = match to {
        Space::Local => transform.world_to_local(world),
        Space::World => world,
        Space::Spherical => transform.try_world_to_spherical(world)?,
    };
    Ok(converted)
}
