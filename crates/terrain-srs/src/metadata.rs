//! Projection metadata for a single raster.
//!
//! [`ProjectionMetadata`] holds the raw GeoTIFF-style keys read from a
//! raster, derives the values a projection engine needs (ellipsoid axes,
//! spec strings) and records the raster's placement in projected space.

use nalgebra::Vector3;
use projection::ProjSpec;
use srs_common::{Body, BodyRadii, BoundingBox, SrsError, SrsResult};
use std::fmt;
use tracing::{debug, warn};

use crate::codes::{TransformCode, CODE_UNDEFINED, CODE_USER_DEFINED};
use crate::families;
use crate::params::{PoleLatitude, ProjectionParameters};
use crate::properties::{keys, Properties};

/// Linear units assumed when a raster does not name any.
pub const DEFAULT_LINEAR_UNITS: &str = "meter";

/// Whether a raster's tie point and scale are in projected units yet.
///
/// `Unprojected` metadata carries geographic degrees. The only transition is
/// to `Projected`, performed once by [`crate::placement::ensure_projected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionState {
    Unprojected,
    Projected,
}

/// Projection metadata and placement of one raster.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionMetadata {
    state: ProjectionState,
    tie_point: Vector3<f64>,
    scale: Vector3<f64>,
    raster_width: u32,
    raster_length: u32,

    /// Celestial body name, e.g. "Mars".
    pub globe: Option<String>,

    // Geographic coordinate system
    pub gcs_code: i32,
    pub datum_code: i32,
    pub ellipsoid_code: i32,
    pub prime_meridian_code: i32,
    pub semi_major_axis: Option<f64>,
    pub semi_minor_axis: Option<f64>,
    pub inverse_flattening: Option<f64>,
    pub gcs_prime_meridian_lon: Option<f64>,
    pub gcs_citation: Option<String>,

    // Projected coordinate system
    pub pcs_code: i32,
    pub proj_code: i32,
    pub transform_code: TransformCode,
    pub params: ProjectionParameters,
    pub pcs_citation: Option<String>,
    pub proj_linear_units: String,
}

impl ProjectionMetadata {
    /// Metadata with a placement and nothing else.
    pub fn new(
        state: ProjectionState,
        raster_width: u32,
        raster_length: u32,
        tie_point: Vector3<f64>,
        scale: Vector3<f64>,
    ) -> Self {
        Self {
            state,
            tie_point,
            scale,
            raster_width,
            raster_length,
            globe: None,
            gcs_code: CODE_UNDEFINED,
            datum_code: CODE_UNDEFINED,
            ellipsoid_code: CODE_UNDEFINED,
            prime_meridian_code: CODE_UNDEFINED,
            semi_major_axis: None,
            semi_minor_axis: None,
            inverse_flattening: None,
            gcs_prime_meridian_lon: None,
            gcs_citation: None,
            pcs_code: CODE_UNDEFINED,
            proj_code: CODE_UNDEFINED,
            transform_code: TransformCode::Undefined,
            params: ProjectionParameters::default(),
            pcs_citation: None,
            proj_linear_units: DEFAULT_LINEAR_UNITS.to_string(),
        }
    }

    /// Orthographic Earth placement centered on (0, 0).
    ///
    /// Used for rasters that arrive with no georeferencing at all.
    pub fn create_default(raster_width: u32, raster_length: u32, pixel_scale: f64) -> Self {
        let tie_point = Vector3::new(
            -pixel_scale * raster_width as f64 / 2.0,
            pixel_scale * raster_length as f64 / 2.0,
            0.0,
        );
        let scale = Vector3::new(pixel_scale, pixel_scale, 1.0);
        let mut metadata = Self::new(
            ProjectionState::Projected,
            raster_width,
            raster_length,
            tie_point,
            scale,
        );
        metadata.globe = Some(Body::Earth.name().to_string());
        metadata.proj_code = TransformCode::Orthographic.code();
        metadata.transform_code = TransformCode::Orthographic;
        metadata.params.center_lat = Some(0.0);
        metadata.params.center_lon = Some(0.0);
        metadata.params.natural_origin_lat = Some(0.0);
        metadata.params.natural_origin_lon = Some(0.0);
        metadata.params.false_easting = Some(0.0);
        metadata.params.false_northing = Some(0.0);
        metadata
    }

    pub fn with_globe(mut self, globe: impl Into<String>) -> Self {
        self.globe = Some(globe.into());
        self
    }

    pub fn state(&self) -> ProjectionState {
        self.state
    }

    pub fn is_projected(&self) -> bool {
        self.state == ProjectionState::Projected
    }

    /// Upper-left reference corner.
    pub fn tie_point(&self) -> Vector3<f64> {
        self.tie_point
    }

    /// Per-pixel increments.
    pub fn scale(&self) -> Vector3<f64> {
        self.scale
    }

    pub fn raster_width(&self) -> u32 {
        self.raster_width
    }

    pub fn raster_length(&self) -> u32 {
        self.raster_length
    }

    /// Record the projected placement. The transition happens once.
    pub(crate) fn mark_projected(&mut self, tie_point: Vector3<f64>, scale: Vector3<f64>) {
        debug_assert_eq!(self.state, ProjectionState::Unprojected);
        self.tie_point = tie_point;
        self.scale = scale;
        self.state = ProjectionState::Projected;
    }

    /// Raster extent, with Y decreasing downward from the tie point.
    ///
    /// No wraparound handling across the antimeridian or the poles.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.tie_point.x,
            self.tie_point.y - self.raster_length as f64 * self.scale.y,
            self.tie_point.x + self.raster_width as f64 * self.scale.x,
            self.tie_point.y,
        )
    }

    /// Approximate degrees per pixel on the equator of the body.
    ///
    /// This divides the scale by the equatorial circumference, so it is only
    /// a rough figure away from the equator and for non-conformal projections.
    pub fn map_resolution_degrees_per_pixel(&mut self) -> SrsResult<Vector3<f64>> {
        let circumference = 2.0 * std::f64::consts::PI * self.resolve_semi_major_axis()?;
        Ok(Vector3::new(
            360.0 * self.scale.x / circumference,
            360.0 * self.scale.y / circumference,
            1.0,
        ))
    }

    fn body_radii(&self) -> SrsResult<BodyRadii> {
        let globe = self.globe.as_deref().unwrap_or("");
        Body::from_name(globe)
            .map(|body| body.radii())
            .ok_or_else(|| SrsError::UnknownBody(globe.to_string()))
    }

    /// Equatorial radius: explicit, else from the polar radius and inverse
    /// flattening, else from the body table. Cached after the first call.
    pub fn resolve_semi_major_axis(&mut self) -> SrsResult<f64> {
        if let Some(major) = self.semi_major_axis {
            return Ok(major);
        }
        let major = match (self.semi_minor_axis, self.inverse_flattening) {
            (Some(minor), Some(inv_f)) if inv_f > 1.0 => minor / (1.0 - 1.0 / inv_f),
            _ => self.body_radii()?.semi_major_axis,
        };
        debug!(globe = ?self.globe, semi_major_axis = major, "Derived semi-major axis");
        self.semi_major_axis = Some(major);
        Ok(major)
    }

    /// Polar radius, derived the same way as the equatorial one.
    pub fn resolve_semi_minor_axis(&mut self) -> SrsResult<f64> {
        if let Some(minor) = self.semi_minor_axis {
            return Ok(minor);
        }
        let minor = match (self.semi_major_axis, self.inverse_flattening) {
            (Some(major), Some(inv_f)) if inv_f > 1.0 => major * (1.0 - 1.0 / inv_f),
            _ => self.body_radii()?.semi_minor_axis,
        };
        debug!(globe = ?self.globe, semi_minor_axis = minor, "Derived semi-minor axis");
        self.semi_minor_axis = Some(minor);
        Ok(minor)
    }

    /// Both axes, major first.
    pub fn resolve_axes(&mut self) -> SrsResult<(f64, f64)> {
        let major = self.resolve_semi_major_axis()?;
        let minor = self.resolve_semi_minor_axis()?;
        Ok((major, minor))
    }

    /// Spec for the raster's projection.
    ///
    /// Codes with a family builder produce a full spec on this body's
    /// ellipsoid. Anything else falls back to an EPSG reference when the
    /// raster carries a coordinate system code. `None` means no spec can be
    /// derived.
    pub fn build_projection_spec(&mut self) -> SrsResult<Option<ProjSpec>> {
        if let Some(family) = families::family(self.transform_code) {
            let (major, minor) = self.resolve_axes()?;
            let spec = family.fragment(&self.params).ellipsoid(major, minor);
            return Ok(Some(spec));
        }
        if self.pcs_code != CODE_UNDEFINED && self.pcs_code != CODE_USER_DEFINED {
            return Ok(Some(ProjSpec::epsg(self.pcs_code)));
        }
        Ok(None)
    }

    /// Like [`build_projection_spec`](Self::build_projection_spec), but a
    /// missing spec is an error.
    pub fn require_projection_spec(&mut self) -> SrsResult<ProjSpec> {
        self.build_projection_spec()?.ok_or_else(|| {
            SrsError::ProjectionUndefined(format!(
                "transform code {} ({}) has no spec builder and no coordinate system code is set",
                self.transform_code.code(),
                self.transform_code.name()
            ))
        })
    }

    /// Longitude/latitude on this body's ellipsoid.
    pub fn geographic_spec(&mut self) -> SrsResult<ProjSpec> {
        let (major, minor) = self.resolve_axes()?;
        Ok(ProjSpec::longlat(major, minor))
    }

    /// Recognize Web Mercator rasters that were written without a transform
    /// code. Returns true when the metadata was changed.
    pub fn apply_web_mercator_heuristic(&mut self) -> bool {
        if self.transform_code.is_defined() {
            return false;
        }
        let citation = self
            .pcs_citation
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        let web_mercator = citation.contains("mercator")
            && (citation.contains("web") || citation.contains("pseudo") || citation.contains("global"));
        if !web_mercator {
            return false;
        }

        self.transform_code = TransformCode::Mercator;
        self.params.natural_origin_lon.get_or_insert(0.0);
        self.params.false_easting.get_or_insert(0.0);
        self.params.false_northing.get_or_insert(0.0);

        if citation.contains("auxiliary") && citation.contains("sphere") {
            match self.semi_major_axis {
                Some(major) => self.semi_minor_axis = Some(major),
                None => {
                    let earth = Body::Earth.radii();
                    self.semi_major_axis = Some(earth.semi_major_axis);
                    self.semi_minor_axis = Some(earth.semi_minor_axis);
                }
            }
        }
        debug!(citation = %citation, "Treating raster as Web Mercator");
        true
    }

    pub fn transform_name(&self) -> &'static str {
        self.transform_code.name()
    }

    pub fn globe_name(&self) -> Option<&str> {
        self.globe.as_deref()
    }

    /// Read metadata from persisted properties.
    pub fn from_properties(props: &Properties) -> SrsResult<Self> {
        let projected = props
            .get_bool(keys::PROJECTED)?
            .ok_or_else(|| SrsError::MissingProperty(keys::PROJECTED.to_string()))?;
        let state = if projected {
            ProjectionState::Projected
        } else {
            ProjectionState::Unprojected
        };
        let tie_point = required_vector3(props, keys::TIE_POINT)?;
        let scale = required_vector3(props, keys::SCALE)?;
        let raster_width = required_dimension(props, keys::RASTER_WIDTH)?;
        let raster_length = match required_dimension(props, keys::RASTER_LENGTH) {
            Ok(length) => length,
            Err(err) if props.contains_key(keys::RASTER_HEIGHT) => {
                warn!(
                    key = keys::RASTER_HEIGHT,
                    error = %err,
                    "Raster length unusable, using legacy key"
                );
                required_dimension(props, keys::RASTER_HEIGHT)?
            }
            Err(err) => return Err(err),
        };

        let mut metadata = Self::new(state, raster_width, raster_length, tie_point, scale);
        metadata.globe = props
            .get(keys::GLOBE)
            .map(str::trim)
            .filter(|globe| !globe.is_empty())
            .map(String::from);

        metadata.gcs_code = positive_code(props, keys::GCS_CODE)?;
        metadata.datum_code = positive_code(props, keys::DATUM_CODE)?;
        metadata.ellipsoid_code = positive_code(props, keys::ELLIPSOID_CODE)?;
        metadata.prime_meridian_code = positive_code(props, keys::PRIME_MERIDIAN_CODE)?;
        metadata.semi_major_axis = positive_f64(props, keys::SEMI_MAJOR_AXIS)?;
        metadata.semi_minor_axis = positive_f64(props, keys::SEMI_MINOR_AXIS)?;
        metadata.inverse_flattening = props.get_f64(keys::INVERSE_FLATTENING)?;
        metadata.gcs_prime_meridian_lon = props.get_f64(keys::GCS_PRIME_MERIDIAN_LON)?;

        metadata.proj_code = positive_code(props, keys::PROJECTION_CODE)?;
        metadata.pcs_code = positive_code(props, keys::PCS_CODE)?;
        let transform_code = positive_code(props, keys::TRANSFORM_CODE)?;
        metadata.transform_code = TransformCode::from_code(transform_code).unwrap_or_else(|| {
            warn!(code = transform_code, "Unknown coordinate transform code");
            TransformCode::Undefined
        });

        let p = &mut metadata.params;
        p.std_parallel_1 = props.get_f64(keys::STD_PARALLEL_1)?;
        p.std_parallel_2 = props.get_f64(keys::STD_PARALLEL_2)?;
        p.natural_origin_lon = props.get_f64(keys::NATURAL_ORIGIN_LON)?;
        p.natural_origin_lat = props.get_f64(keys::NATURAL_ORIGIN_LAT)?;
        p.false_origin_lon = props.get_f64(keys::FALSE_ORIGIN_LON)?;
        p.false_origin_lat = props.get_f64(keys::FALSE_ORIGIN_LAT)?;
        p.false_easting = props.get_f64(keys::FALSE_EASTING)?;
        p.false_northing = props.get_f64(keys::FALSE_NORTHING)?;
        p.center_easting = props.get_f64(keys::CENTER_EASTING)?;
        p.center_northing = props.get_f64(keys::CENTER_NORTHING)?;
        p.center_lon = props.get_f64(keys::CENTER_LON)?;
        p.center_lat = props.get_f64(keys::CENTER_LAT)?;
        p.scale_at_natural_origin = props.get_f64(keys::SCALE_AT_NATURAL_ORIGIN)?;
        p.scale_at_center = props.get_f64(keys::SCALE_AT_CENTER)?;
        p.azimuth = props.get_f64(keys::AZIMUTH)?;
        p.straight_vert_pole_lon = props.get_f64(keys::STRAIGHT_VERT_POLE_LON)?;
        p.pole_latitude = p
            .std_parallel_1
            .map(PoleLatitude::from_sign)
            .unwrap_or_default();

        metadata.gcs_citation = props.get(keys::GCS_CITATION).map(String::from);
        metadata.pcs_citation = props.get(keys::PCS_CITATION).map(String::from);
        metadata.proj_linear_units = props
            .get(keys::PROJ_LINEAR_UNITS)
            .unwrap_or(DEFAULT_LINEAR_UNITS)
            .to_string();

        metadata.apply_web_mercator_heuristic();
        Ok(metadata)
    }

    /// Write metadata to properties.
    ///
    /// A missing globe is written as `default_globe`. Unset optional values
    /// and non-positive codes are omitted.
    pub fn to_properties(&self, default_globe: &str) -> Properties {
        let mut props = Properties::new();
        props.set(keys::PROJECTED, self.is_projected().to_string());
        props.set_f64_list(keys::TIE_POINT, self.tie_point.as_slice());
        props.set_f64_list(keys::SCALE, self.scale.as_slice());
        props.set(keys::GLOBE, self.globe.as_deref().unwrap_or(default_globe));
        props.set(keys::RASTER_WIDTH, self.raster_width.to_string());
        props.set(keys::RASTER_LENGTH, self.raster_length.to_string());
        props.set(keys::PROJ_LINEAR_UNITS, self.proj_linear_units.as_str());

        let codes = [
            (keys::GCS_CODE, self.gcs_code),
            (keys::DATUM_CODE, self.datum_code),
            (keys::ELLIPSOID_CODE, self.ellipsoid_code),
            (keys::PRIME_MERIDIAN_CODE, self.prime_meridian_code),
            (keys::PROJECTION_CODE, self.proj_code),
            (keys::PCS_CODE, self.pcs_code),
            (keys::TRANSFORM_CODE, self.transform_code.code()),
        ];
        for (key, code) in codes {
            if code > 0 {
                props.set(key, code.to_string());
            }
        }

        let p = &self.params;
        let values = [
            (keys::SEMI_MAJOR_AXIS, self.semi_major_axis),
            (keys::SEMI_MINOR_AXIS, self.semi_minor_axis),
            (keys::INVERSE_FLATTENING, self.inverse_flattening),
            (keys::GCS_PRIME_MERIDIAN_LON, self.gcs_prime_meridian_lon),
            (keys::STD_PARALLEL_1, p.std_parallel_1),
            (keys::STD_PARALLEL_2, p.std_parallel_2),
            (keys::NATURAL_ORIGIN_LON, p.natural_origin_lon),
            (keys::NATURAL_ORIGIN_LAT, p.natural_origin_lat),
            (keys::FALSE_ORIGIN_LON, p.false_origin_lon),
            (keys::FALSE_ORIGIN_LAT, p.false_origin_lat),
            (keys::FALSE_EASTING, p.false_easting),
            (keys::FALSE_NORTHING, p.false_northing),
            (keys::CENTER_EASTING, p.center_easting),
            (keys::CENTER_NORTHING, p.center_northing),
            (keys::CENTER_LON, p.center_lon),
            (keys::CENTER_LAT, p.center_lat),
            (keys::SCALE_AT_NATURAL_ORIGIN, p.scale_at_natural_origin),
            (keys::SCALE_AT_CENTER, p.scale_at_center),
            (keys::AZIMUTH, p.azimuth),
            (keys::STRAIGHT_VERT_POLE_LON, p.straight_vert_pole_lon),
        ];
        for (key, value) in values {
            if let Some(value) = value {
                props.set(key, value.to_string());
            }
        }

        if let Some(citation) = &self.gcs_citation {
            props.set(keys::GCS_CITATION, citation.as_str());
        }
        if let Some(citation) = &self.pcs_citation {
            props.set(keys::PCS_CITATION, citation.as_str());
        }
        props
    }
}

fn required_vector3(props: &Properties, key: &str) -> SrsResult<Vector3<f64>> {
    let values = props
        .get_f64_list(key)?
        .ok_or_else(|| SrsError::MissingProperty(key.to_string()))?;
    match values.as_slice() {
        [x, y, z, ..] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(SrsError::InvalidProperty {
            key: key.to_string(),
            message: format!("expected 3 components, found {}", values.len()),
        }),
    }
}

fn required_dimension(props: &Properties, key: &str) -> SrsResult<u32> {
    let value = props
        .get_i32(key)?
        .ok_or_else(|| SrsError::MissingProperty(key.to_string()))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| SrsError::InvalidProperty {
            key: key.to_string(),
            message: format!("must be positive, found {}", value),
        })
}

fn positive_code(props: &Properties, key: &str) -> SrsResult<i32> {
    Ok(props.get_i32(key)?.filter(|v| *v > 0).unwrap_or(CODE_UNDEFINED))
}

fn positive_f64(props: &Properties, key: &str) -> SrsResult<Option<f64>> {
    Ok(props.get_f64(key)?.filter(|v| *v > 0.0))
}

impl fmt::Display for ProjectionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Projection Info:")?;
        writeln!(f, "    Projected = {}", self.is_projected())?;
        writeln!(
            f,
            "    TiePoint = {},{},{}",
            self.tie_point.x, self.tie_point.y, self.tie_point.z
        )?;
        writeln!(
            f,
            "    Scale = {},{},{}",
            self.scale.x, self.scale.y, self.scale.z
        )?;
        writeln!(f, "    Globe = {}", self.globe.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "    Raster Width = {}", self.raster_width)?;
        writeln!(f, "    Raster Length = {}", self.raster_length)?;
        if self.is_projected() {
            writeln!(f, "    Units = {}", self.proj_linear_units)?;
        }

        let codes = [
            ("GCSCode", self.gcs_code),
            ("DatumCode", self.datum_code),
            ("EllipsoidCode", self.ellipsoid_code),
            ("PrimeMeridianCode", self.prime_meridian_code),
            ("ProjectionCode", self.proj_code),
            ("ProjectionCoordinateSystemCode", self.pcs_code),
        ];
        for (name, code) in codes {
            if code > 0 {
                writeln!(f, "    {} = {}", name, code)?;
            }
        }
        writeln!(f, "    CoordTransformCode = {}", self.transform_code)?;

        let p = &self.params;
        let values = [
            ("SemiMajorAxis", self.semi_major_axis),
            ("SemiMinorAxis", self.semi_minor_axis),
            ("InverseFlattening", self.inverse_flattening),
            ("GCSPrimeMeridianLon", self.gcs_prime_meridian_lon),
            ("StdParallel1", p.std_parallel_1),
            ("StdParallel2", p.std_parallel_2),
            ("NaturalOriginLon", p.natural_origin_lon),
            ("NaturalOriginLat", p.natural_origin_lat),
            ("FalseOriginLon", p.false_origin_lon),
            ("FalseOriginLat", p.false_origin_lat),
            ("FalseEasting", p.false_easting),
            ("FalseNorthing", p.false_northing),
            ("CenterEasting", p.center_easting),
            ("CenterNorthing", p.center_northing),
            ("CenterLon", p.center_lon),
            ("CenterLat", p.center_lat),
            ("ScaleAtNaturalOrigin", p.scale_at_natural_origin),
            ("ScaleAtCenter", p.scale_at_center),
            ("Azimuth", p.azimuth),
            ("StraightVertPoleLon", p.straight_vert_pole_lon),
        ];
        for (name, value) in values {
            if let Some(value) = value {
                writeln!(f, "    {} = {}", name, value)?;
            }
        }

        if let Some(citation) = &self.gcs_citation {
            writeln!(f, "    GCSCitation = {}", citation)?;
        }
        if let Some(citation) = &self.pcs_citation {
            writeln!(f, "    PCSCitation = {}", citation)?;
        }
        Ok(())
    }
}
