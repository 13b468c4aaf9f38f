//! Loading, saving and deriving projection metadata.

use nalgebra::Vector3;
use terrain_srs::{
    keys, PoleLatitude, ProjectionMetadata, ProjectionState, Properties, SrsError,
    TransformCode,
};
use test_utils::fixtures::properties as samples;
use test_utils::{assert_approx_eq, require_test_file, temp_test_dir};

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn load(pairs: &[(&str, &str)]) -> ProjectionMetadata {
    ProjectionMetadata::from_properties(&props(pairs)).unwrap()
}

#[test]
fn test_load_projected_raster() {
    let metadata = load(samples::MARS_EQUIRECTANGULAR);
    assert!(metadata.is_projected());
    assert_eq!(metadata.tie_point(), Vector3::new(-118560.0, 59280.0, 0.0));
    assert_eq!(metadata.scale(), Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(metadata.raster_width(), 1024);
    assert_eq!(metadata.raster_length(), 2048);
    assert_eq!(metadata.transform_code, TransformCode::Equirectangular);
    assert_eq!(metadata.globe_name(), Some("Mars"));
    assert_eq!(metadata.semi_major_axis, Some(3396190.0));
    assert_eq!(metadata.proj_linear_units, "meter");
}

#[test]
fn test_load_unprojected_raster() {
    let metadata = load(samples::MARS_GEOGRAPHIC);
    assert_eq!(metadata.state(), ProjectionState::Unprojected);
    assert_eq!(metadata.transform_code, TransformCode::Undefined);
    let bounds = metadata.bounds();
    assert_approx_eq!(bounds.min_x, -10.0, 1e-9);
    assert_approx_eq!(bounds.max_x, 10.0, 1e-9);
    assert_approx_eq!(bounds.min_y, -5.0, 1e-9);
    assert_approx_eq!(bounds.max_y, 5.0, 1e-9);
}

#[test]
fn test_legacy_raster_height() {
    let metadata = load(samples::LEGACY_HEIGHT);
    assert_eq!(metadata.raster_length(), 40);
    assert_eq!(metadata.transform_code, TransformCode::Sinusoidal);
}

#[test]
fn test_raster_length_wins_over_legacy_key() {
    let mut p = props(samples::LEGACY_HEIGHT);
    p.set(keys::RASTER_LENGTH, "60");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.raster_length(), 60);
}

#[test]
fn test_unusable_raster_length_falls_back_to_legacy_key() {
    for bad in ["", "  ", "tall", "-3", "0"] {
        let mut p = props(samples::LEGACY_HEIGHT);
        p.set(keys::RASTER_LENGTH, bad);
        let metadata = ProjectionMetadata::from_properties(&p).unwrap();
        assert_eq!(metadata.raster_length(), 40, "RasterLength = {:?}", bad);
    }
}

#[test]
fn test_unusable_raster_length_without_legacy_key() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::RASTER_LENGTH, "tall");
    assert!(matches!(
        ProjectionMetadata::from_properties(&p),
        Err(SrsError::InvalidProperty { ref key, .. }) if key == keys::RASTER_LENGTH
    ));

    p.remove(keys::RASTER_LENGTH);
    assert!(matches!(
        ProjectionMetadata::from_properties(&p),
        Err(SrsError::MissingProperty(ref key)) if key == keys::RASTER_LENGTH
    ));
}

#[test]
fn test_non_finite_parameters_are_unset() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::TRANSFORM_CODE, "7");
    p.set(keys::STD_PARALLEL_1, "NaN");
    p.set(keys::NATURAL_ORIGIN_LON, "inf");
    let mut metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.params.std_parallel_1, None);
    assert_eq!(metadata.params.natural_origin_lon, None);
    assert_eq!(metadata.params.pole_latitude, PoleLatitude::North);

    let spec = metadata.require_projection_spec().unwrap().to_string();
    assert!(!spec.contains("NaN") && !spec.contains("inf"), "{}", spec);
    assert!(spec.starts_with("+proj=merc +lon_0=0 +lat_ts=0 "), "{}", spec);
}

#[test]
fn test_missing_required_key() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.remove(keys::RASTER_WIDTH);
    let err = ProjectionMetadata::from_properties(&p).unwrap_err();
    assert!(matches!(err, SrsError::MissingProperty(ref key) if key == keys::RASTER_WIDTH));

    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.remove(keys::TIE_POINT);
    assert!(matches!(
        ProjectionMetadata::from_properties(&p),
        Err(SrsError::MissingProperty(_))
    ));
}

#[test]
fn test_non_positive_width_is_invalid() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::RASTER_WIDTH, "0");
    assert!(matches!(
        ProjectionMetadata::from_properties(&p),
        Err(SrsError::InvalidProperty { .. })
    ));
}

#[test]
fn test_short_tie_point_is_invalid() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::TIE_POINT, "1,2");
    assert!(matches!(
        ProjectionMetadata::from_properties(&p),
        Err(SrsError::InvalidProperty { .. })
    ));
}

#[test]
fn test_codes_and_axes_must_be_positive() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::DATUM_CODE, "-5");
    p.set(keys::SEMI_MAJOR_AXIS, "0");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.datum_code, 0);
    assert_eq!(metadata.semi_major_axis, None);
}

#[test]
fn test_ellipsoid_code_has_its_own_key() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::DATUM_CODE, "6326");
    p.set(keys::ELLIPSOID_CODE, "7030");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.datum_code, 6326);
    assert_eq!(metadata.ellipsoid_code, 7030);
}

#[test]
fn test_gcs_and_prime_meridian_codes_persist() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::GCS_CODE, "4326");
    p.set(keys::PRIME_MERIDIAN_CODE, "8901");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.gcs_code, 4326);
    assert_eq!(metadata.prime_meridian_code, 8901);

    let saved = metadata.to_properties("Mars");
    assert_eq!(saved.get(keys::GCS_CODE), Some("4326"));
    assert_eq!(saved.get(keys::PRIME_MERIDIAN_CODE), Some("8901"));
}

#[test]
fn test_pole_latitude_from_first_parallel() {
    let mut p = props(samples::MARS_EQUIRECTANGULAR);
    p.set(keys::STD_PARALLEL_1, "-71");
    assert_eq!(
        ProjectionMetadata::from_properties(&p).unwrap().params.pole_latitude,
        PoleLatitude::South
    );

    let metadata = load(samples::MARS_EQUIRECTANGULAR);
    assert_eq!(metadata.params.pole_latitude, PoleLatitude::North);
}

#[test]
fn test_axis_derived_from_minor_and_flattening() {
    let mut metadata = ProjectionMetadata::new(
        ProjectionState::Projected,
        10,
        10,
        Vector3::zeros(),
        Vector3::new(1.0, 1.0, 1.0),
    );
    metadata.semi_minor_axis = Some(3376200.0);
    metadata.inverse_flattening = Some(169.8);

    let major = metadata.resolve_semi_major_axis().unwrap();
    assert_approx_eq!(major, 3396200.0, 5.0);
    assert_eq!(metadata.semi_major_axis, Some(major));
    assert_eq!(metadata.resolve_semi_major_axis().unwrap(), major);
}

#[test]
fn test_axis_derived_from_major_and_flattening() {
    let mut metadata = ProjectionMetadata::create_default(10, 10, 1.0);
    metadata.semi_major_axis = Some(6378137.0);
    metadata.inverse_flattening = Some(298.257223563);
    assert_approx_eq!(metadata.resolve_semi_minor_axis().unwrap(), 6356752.314, 1e-3);
}

#[test]
fn test_axes_from_mars_table_are_exact() {
    let mut metadata = load(samples::MARS_GEOGRAPHIC);
    assert_eq!(metadata.resolve_axes().unwrap(), (3396200.0, 3376200.0));
}

#[test]
fn test_missing_globe_is_unknown_body() {
    let mut p = props(samples::MARS_GEOGRAPHIC);
    p.remove(keys::GLOBE);
    let mut metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert!(matches!(
        metadata.geographic_spec(),
        Err(SrsError::UnknownBody(_))
    ));
}

#[test]
fn test_globe_lookup_ignores_case() {
    let mut metadata = load(samples::MARS_GEOGRAPHIC).with_globe("mars");
    assert_eq!(
        metadata.geographic_spec().unwrap().to_string(),
        "+proj=longlat +a=3396200 +b=3376200 +no_defs"
    );
}

#[test]
fn test_web_mercator_detection() {
    let mut metadata = load(samples::WEB_MERCATOR);
    assert_eq!(metadata.transform_code, TransformCode::Mercator);
    assert_eq!(metadata.params.natural_origin_lon, Some(0.0));
    assert_eq!(metadata.params.false_easting, Some(0.0));
    assert_eq!(metadata.params.false_northing, Some(0.0));
    assert_eq!(
        metadata.build_projection_spec().unwrap().unwrap().to_string(),
        "+proj=merc +lon_0=0 +lat_ts=0 +x_0=0 +y_0=0 +a=6378137 +b=6356800 +no_defs"
    );
}

#[test]
fn test_web_mercator_keeps_explicit_values() {
    let mut p = props(samples::WEB_MERCATOR);
    p.set(keys::FALSE_EASTING, "100");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.params.false_easting, Some(100.0));
}

#[test]
fn test_web_mercator_auxiliary_sphere() {
    let mut p = props(samples::WEB_MERCATOR);
    p.set(keys::PCS_CITATION, "WGS 84 / Pseudo-Mercator (Auxiliary Sphere)");
    p.set(keys::SEMI_MAJOR_AXIS, "6378137");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.semi_minor_axis, Some(6378137.0));
}

#[test]
fn test_web_mercator_needs_defined_code_unset() {
    let mut p = props(samples::WEB_MERCATOR);
    p.set(keys::TRANSFORM_CODE, "1");
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.transform_code, TransformCode::TransverseMercator);
    assert_eq!(metadata.params.natural_origin_lon, None);
}

#[test]
fn test_plain_mercator_citation_is_not_web() {
    let mut p = props(samples::WEB_MERCATOR);
    p.set(keys::PCS_CITATION, "Mercator");
    let mut metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.transform_code, TransformCode::Undefined);
    assert_eq!(
        metadata.build_projection_spec().unwrap().unwrap().to_string(),
        "+init=epsg:3857"
    );
}

#[test]
fn test_save_then_load_is_identity() {
    let original = load(samples::MARS_EQUIRECTANGULAR);
    let reloaded = ProjectionMetadata::from_properties(&original.to_properties("Earth")).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_save_omits_unset_values() {
    let props = load(samples::LEGACY_HEIGHT).to_properties("Mars");
    assert_eq!(props.get(keys::RASTER_LENGTH), Some("40"));
    assert_eq!(props.get(keys::RASTER_HEIGHT), None);
    assert_eq!(props.get(keys::CENTER_LON), None);
    assert_eq!(props.get(keys::DATUM_CODE), None);
    assert_eq!(props.get(keys::PCS_CODE), None);
    assert_eq!(props.get(keys::TRANSFORM_CODE), Some("24"));
    assert!(props.iter().all(|(key, _)| key.starts_with(keys::PREFIX)));
    assert!(props.iter().all(|(_, value)| !value.contains("NaN")));
}

#[test]
fn test_save_fills_default_globe() {
    let mut p = props(samples::MARS_GEOGRAPHIC);
    p.remove(keys::GLOBE);
    let metadata = ProjectionMetadata::from_properties(&p).unwrap();
    assert_eq!(metadata.globe_name(), None);
    let saved = metadata.to_properties("Mars");
    assert_eq!(saved.get(keys::GLOBE), Some("Mars"));
}

#[test]
fn test_map_resolution() {
    let mut metadata = load(samples::MARS_EQUIRECTANGULAR);
    let resolution = metadata.map_resolution_degrees_per_pixel().unwrap();
    let expected = 360.0 / (2.0 * std::f64::consts::PI * 3396190.0);
    assert_approx_eq!(resolution.x, expected, 1e-15);
    assert_approx_eq!(resolution.y, expected, 1e-15);
    assert_eq!(resolution.z, 1.0);
}

#[test]
fn test_sample_files_load() {
    let path = require_test_file!("moon_south_pole.properties");
    let mut metadata = ProjectionMetadata::from_properties(&Properties::load(path).unwrap()).unwrap();
    assert_eq!(metadata.transform_code, TransformCode::PolarStereographic);
    assert_eq!(metadata.params.pole_latitude, PoleLatitude::South);
    assert_eq!(
        metadata.require_projection_spec().unwrap().to_string(),
        "+proj=stere +lat_0=-90 +lon_0=0 +k_0=1 +x_0=0 +y_0=0 +a=1737400 +b=1737400 +no_defs"
    );

    let path = require_test_file!("mars_geographic.json");
    let metadata = ProjectionMetadata::from_properties(&Properties::load(path).unwrap()).unwrap();
    assert!(!metadata.is_projected());
    assert_eq!(metadata.raster_width(), 1000);

    let path = require_test_file!("web_mercator.yaml");
    let mut metadata = ProjectionMetadata::from_properties(&Properties::load(path).unwrap()).unwrap();
    assert_eq!(metadata.transform_code, TransformCode::Mercator);
    assert_eq!(metadata.resolve_axes().unwrap(), (6378137.0, 6356800.0));
}

#[test]
fn test_file_round_trip_in_every_format() {
    let dir = temp_test_dir();
    let original = load(samples::WEB_MERCATOR);
    let saved = original.to_properties("Earth");

    for name in ["meta.properties", "meta.json", "meta.yaml"] {
        let path = dir.path().join(name);
        saved.save(&path).unwrap();
        let reloaded = Properties::load(&path).unwrap();
        assert_eq!(reloaded, saved, "{}", name);
        assert_eq!(
            ProjectionMetadata::from_properties(&reloaded).unwrap(),
            original,
            "{}",
            name
        );
    }
}
