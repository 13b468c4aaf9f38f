//! Projection family builders.
//!
//! Each supported transform code maps to a pure function from
//! [`ProjectionParameters`] to a spec fragment. The caller appends the
//! ellipsoid axes.

use projection::ProjSpec;

use crate::codes::TransformCode;
use crate::params::ProjectionParameters;

type Builder = fn(ProjSpec, &ProjectionParameters) -> ProjSpec;

/// One row of the family table.
pub struct ProjectionFamily {
    pub code: TransformCode,
    /// PROJ projection name (`+proj=<name>`).
    pub proj: &'static str,
    build: Builder,
}

impl ProjectionFamily {
    /// Spec fragment for this family, ending with the false easting/northing.
    pub fn fragment(&self, params: &ProjectionParameters) -> ProjSpec {
        (self.build)(ProjSpec::new(self.proj), params)
            .param("x_0", params.false_easting.unwrap_or(0.0))
            .param("y_0", params.false_northing.unwrap_or(0.0))
    }
}

impl std::fmt::Debug for ProjectionFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionFamily")
            .field("code", &self.code)
            .field("proj", &self.proj)
            .finish()
    }
}

fn angle(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn scale_factor(value: Option<f64>) -> f64 {
    value.unwrap_or(1.0)
}

/// Latitude/longitude of the projection center.
fn centered(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    spec.param("lat_0", angle(p.center_lat))
        .param("lon_0", angle(p.center_lon))
}

/// Latitude/longitude of the natural origin.
fn natural_origin(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    spec.param("lat_0", angle(p.natural_origin_lat))
        .param("lon_0", angle(p.natural_origin_lon))
}

fn natural_origin_scaled(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    natural_origin(spec, p).param("k", scale_factor(p.scale_at_natural_origin))
}

fn two_parallels(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    let spec = spec
        .param("lat_1", angle(p.std_parallel_1))
        .param("lat_2", angle(p.std_parallel_2));
    natural_origin(spec, p)
}

fn center_meridian(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    spec.param("lon_0", angle(p.center_lon))
}

fn cylindrical_equal_area(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    spec.param("lon_0", angle(p.natural_origin_lon))
        .param("lat_ts", angle(p.std_parallel_1))
}

fn equirectangular(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    spec.param("lat_0", 0.0)
        .param("lat_ts", angle(p.center_lat))
        .param("lon_0", angle(p.center_lon))
}

fn oblique_mercator(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    spec.param("lat_0", angle(p.center_lat))
        .param("lonc", angle(p.center_lon))
        .param("alpha", angle(p.azimuth))
        .param("k_0", scale_factor(p.scale_at_center))
}

/// Single standard parallel at the natural origin latitude.
fn lambert_1sp(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    natural_origin_scaled(spec.param("lat_1", angle(p.natural_origin_lat)), p)
}

/// Central meridian falls back from the natural origin to the false origin.
fn lambert_2sp(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    let lon_0 = p
        .natural_origin_lon
        .or(p.false_origin_lon)
        .unwrap_or(0.0);
    spec.param("lat_1", angle(p.std_parallel_1))
        .param("lat_2", angle(p.std_parallel_2))
        .param("lat_0", angle(p.false_origin_lat))
        .param("lon_0", lon_0)
}

/// A standard parallel wins over a scale factor; neither means `lat_ts=0`.
fn mercator(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    let spec = spec.param("lon_0", angle(p.natural_origin_lon));
    match (p.std_parallel_1, p.scale_at_natural_origin) {
        (Some(lat_ts), _) => spec.param("lat_ts", lat_ts),
        (None, Some(k)) => spec.param("k_0", k),
        (None, None) => spec.param("lat_ts", 0.0),
    }
}

fn polar_stereographic(spec: ProjSpec, p: &ProjectionParameters) -> ProjSpec {
    let spec = match p.natural_origin_lat {
        Some(lat_ts) => spec.param("lat_ts", lat_ts),
        None => spec,
    };
    spec.param("lat_0", p.pole_latitude.degrees())
        .param("lon_0", angle(p.natural_origin_lon))
        .param("k_0", scale_factor(p.scale_at_natural_origin))
}

/// Every transform code with a spec builder, in code order.
pub static FAMILIES: &[ProjectionFamily] = &[
    ProjectionFamily {
        code: TransformCode::TransverseMercator,
        proj: "tmerc",
        build: natural_origin_scaled,
    },
    ProjectionFamily {
        code: TransformCode::ObliqueMercator,
        proj: "omerc",
        build: oblique_mercator,
    },
    ProjectionFamily {
        code: TransformCode::Mercator,
        proj: "merc",
        build: mercator,
    },
    ProjectionFamily {
        code: TransformCode::LambertConfConic2SP,
        proj: "lcc",
        build: lambert_2sp,
    },
    ProjectionFamily {
        code: TransformCode::LambertConfConicHelmert,
        proj: "lcc",
        build: lambert_1sp,
    },
    ProjectionFamily {
        code: TransformCode::LambertAzimEqualArea,
        proj: "laea",
        build: centered,
    },
    ProjectionFamily {
        code: TransformCode::AlbersEqualArea,
        proj: "aea",
        build: two_parallels,
    },
    ProjectionFamily {
        code: TransformCode::AzimuthalEquidistant,
        proj: "aeqd",
        build: centered,
    },
    ProjectionFamily {
        code: TransformCode::EquidistantConic,
        proj: "eqdc",
        build: two_parallels,
    },
    ProjectionFamily {
        code: TransformCode::PolarStereographic,
        proj: "stere",
        build: polar_stereographic,
    },
    ProjectionFamily {
        code: TransformCode::ObliqueStereographic,
        proj: "sterea",
        build: natural_origin_scaled,
    },
    ProjectionFamily {
        code: TransformCode::Equirectangular,
        proj: "eqc",
        build: equirectangular,
    },
    ProjectionFamily {
        code: TransformCode::CassiniSoldner,
        proj: "cass",
        build: natural_origin,
    },
    ProjectionFamily {
        code: TransformCode::Gnomonic,
        proj: "gnom",
        build: centered,
    },
    ProjectionFamily {
        code: TransformCode::MillerCylindrical,
        proj: "mill",
        build: centered,
    },
    ProjectionFamily {
        code: TransformCode::Orthographic,
        proj: "ortho",
        build: centered,
    },
    ProjectionFamily {
        code: TransformCode::Polyconic,
        proj: "poly",
        build: natural_origin,
    },
    ProjectionFamily {
        code: TransformCode::Robinson,
        proj: "robin",
        build: center_meridian,
    },
    ProjectionFamily {
        code: TransformCode::Sinusoidal,
        proj: "sinu",
        build: center_meridian,
    },
    ProjectionFamily {
        code: TransformCode::VanDerGrinten,
        proj: "vandg",
        build: center_meridian,
    },
    ProjectionFamily {
        code: TransformCode::NewZealandMapGrid,
        proj: "nzmg",
        build: centered,
    },
    ProjectionFamily {
        code: TransformCode::CylindricalEqualArea,
        proj: "cea",
        build: cylindrical_equal_area,
    },
];

/// Builder for a transform code, if the code has one.
pub fn family(code: TransformCode) -> Option<&'static ProjectionFamily> {
    FAMILIES.iter().find(|family| family.code == code)
}
