//! End-to-end tests of the tool commands against files on disk.

use nalgebra::Vector3;
use srs_tool::{convert, info, load_metadata, project, Space};
use terrain_srs::{keys, Properties, TransformCode};
use test_utils::fixtures::properties as samples;
use test_utils::{assert_approx_eq, assert_coords_approx_eq};

fn write_sample(dir: &std::path::Path, name: &str, pairs: &[(&str, &str)]) -> std::path::PathBuf {
    let props: Properties = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let path = dir.join(name);
    props.save(&path).unwrap();
    path
}

#[test]
fn test_info_lists_specs_and_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "dem.properties", samples::MARS_EQUIRECTANGULAR);

    let text = info(&path, "Mars").unwrap();
    assert!(text.contains("Projection Info:"));
    assert!(text.contains("Projection spec: +proj=eqc"), "{}", text);
    assert!(text.contains("Geographic spec: +proj=longlat +a=3396190 +b=3396190 +no_defs"));
    assert!(text.contains("Bounds: [-118560, 57232, -117536, 59280]"), "{}", text);
    assert!(text.contains("Approximate resolution"));
}

#[test]
fn test_info_on_unprojected_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "geo.json", samples::MARS_GEOGRAPHIC);
    let text = info(&path, "Mars").unwrap();
    assert!(text.contains("Projected = false"));
    assert!(text.contains("(chosen when projected)"));
}

#[test]
fn test_missing_globe_uses_default() {
    let dir = tempfile::tempdir().unwrap();
    let pairs: Vec<(&str, &str)> = samples::MARS_GEOGRAPHIC
        .iter()
        .copied()
        .filter(|(key, _)| *key != keys::GLOBE)
        .collect();
    let path = write_sample(dir.path(), "geo.properties", &pairs);

    let metadata = load_metadata(&path, "Moon").unwrap();
    assert_eq!(metadata.globe_name(), Some("Moon"));
}

#[test]
fn test_project_rewrites_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let mut pairs = samples::MARS_GEOGRAPHIC.to_vec();
    pairs.push(("Landscape.Name", "Gale"));
    let path = write_sample(dir.path(), "geo.properties", &pairs);

    let metadata = project(&path, None, "Mars").unwrap();
    assert!(metadata.is_projected());
    assert_eq!(metadata.transform_code, TransformCode::Equirectangular);

    let saved = Properties::load(&path).unwrap();
    assert_eq!(saved.get(keys::PROJECTED), Some("true"));
    assert_eq!(saved.get(keys::TRANSFORM_CODE), Some("17"));
    assert_eq!(saved.get("Landscape.Name"), Some("Gale"));
}

#[test]
fn test_project_to_other_file_keeps_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_sample(dir.path(), "geo.yaml", samples::MARS_GEOGRAPHIC);
    let output = dir.path().join("projected.json");

    project(&input, Some(&output), "Mars").unwrap();

    let original = Properties::load(&input).unwrap();
    assert_eq!(original.get(keys::PROJECTED), Some("false"));
    let written = Properties::load(&output).unwrap();
    assert_eq!(written.get(keys::PROJECTED), Some("true"));
}

#[test]
fn test_project_is_idempotent_for_projected_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "dem.properties", samples::MARS_EQUIRECTANGULAR);
    let before = Properties::load(&path).unwrap();
    project(&path, None, "Mars").unwrap();
    let after = Properties::load(&path).unwrap();
    assert_eq!(after.get(keys::TIE_POINT), before.get(keys::TIE_POINT));
    assert_eq!(after.get(keys::SCALE), before.get(keys::SCALE));
}

#[test]
fn test_project_reports_unplaceable_raster() {
    let dir = tempfile::tempdir().unwrap();
    let mut pairs = samples::MARS_GEOGRAPHIC.to_vec();
    pairs.retain(|(key, _)| *key != keys::GLOBE);
    pairs.push((keys::GLOBE, "Vulcan"));
    let path = write_sample(dir.path(), "geo.properties", &pairs);

    let err = project(&path, None, "Mars").unwrap_err();
    assert!(format!("{:#}", err).contains("Vulcan"), "{:#}", err);
}

#[test]
fn test_convert_local_center_to_spherical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "geo.properties", samples::MARS_GEOGRAPHIC);

    let lon_lat = convert(
        &path,
        Space::Local,
        Space::Spherical,
        Vector3::new(0.0, 0.0, 12.0),
        "Mars",
    )
    .unwrap();
    assert_coords_approx_eq!((lon_lat.x, lon_lat.y), (0.0, 0.0), 1e-6);
    assert_eq!(lon_lat.z, 12.0);
}

#[test]
fn test_convert_spherical_world_local_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "dem.properties", samples::MARS_EQUIRECTANGULAR);
    let spherical = Vector3::new(-1.99, 0.99, 0.0);

    let local = convert(&path, Space::Spherical, Space::Local, spherical, "Mars").unwrap();
    let back = convert(&path, Space::Local, Space::Spherical, local, "Mars").unwrap();
    assert_coords_approx_eq!(back, spherical, 1e-6);

    let world = convert(&path, Space::Spherical, Space::World, spherical, "Mars").unwrap();
    assert_approx_eq!(world.x, 3396190.0 * (-1.99f64).to_radians(), 1e-3);
}
