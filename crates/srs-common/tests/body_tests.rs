//! Tests for the body ellipsoid table.

use srs_common::body::{lookup, Body, BodyRadii};
use srs_common::SrsError;

// ============================================================================
// Table contents
// ============================================================================

#[test]
fn test_table_has_nineteen_bodies() {
    assert_eq!(Body::ALL.len(), 19);
    assert_eq!(Body::ALL[0], Body::Earth);
    assert_eq!(Body::ALL[18], Body::Deimos);
}

#[test]
fn test_mars_radii() {
    let radii = Body::Mars.radii();
    assert_eq!(radii.semi_major_axis, 3396200.0);
    assert_eq!(radii.semi_minor_axis, 3376200.0);
}

#[test]
fn test_earth_radii() {
    assert_eq!(Body::Earth.radii(), BodyRadii::new(6378137.0, 6356800.0));
}

#[test]
fn test_moon_and_phobos_radii() {
    assert_eq!(Body::Moon.radii(), BodyRadii::new(1738140.0, 1735970.0));
    assert_eq!(Body::Phobos.radii(), BodyRadii::new(11266.7, 11266.7));
}

#[test]
fn test_gas_giants_are_oblate() {
    for body in [Body::Jupiter, Body::Saturn, Body::Uranus, Body::Neptune] {
        let radii = body.radii();
        assert!(
            radii.semi_major_axis > radii.semi_minor_axis,
            "{} should be oblate",
            body
        );
    }
}

#[test]
fn test_axes_never_inverted() {
    for body in Body::ALL {
        let radii = body.radii();
        assert!(radii.semi_major_axis >= radii.semi_minor_axis, "{}", body);
        assert!(radii.semi_minor_axis > 0.0, "{}", body);
    }
}

// ============================================================================
// Name lookup
// ============================================================================

#[test]
fn test_name_round_trip() {
    for body in Body::ALL {
        assert_eq!(Body::from_name(body.name()), Some(body));
        assert_eq!(body.to_string(), body.name());
    }
}

#[test]
fn test_lookup_unknown_body() {
    assert!(lookup("Arrakis").is_none());
}

#[test]
fn test_lookup_case_insensitive() {
    assert_eq!(lookup("ENCELADUS"), Some(Body::Enceladus.radii()));
}

#[test]
fn test_parse_unknown_body_error() {
    let result: Result<Body, _> = "Arrakis".parse();
    assert!(matches!(result, Err(SrsError::UnknownBody(name)) if name == "Arrakis"));
}

#[test]
fn test_mars_inverse_flattening() {
    let inv_f = Body::Mars.radii().inverse_flattening().unwrap();
    assert!((inv_f - 169.81).abs() < 0.01, "got {}", inv_f);
}
