//! Tests for BoundingBox operations.

use srs_common::BoundingBox;

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_dimensions() {
    let bbox = BoundingBox::new(-10.0, -5.0, 10.0, 5.0);
    assert_eq!(bbox.width(), 20.0);
    assert_eq!(bbox.height(), 10.0);
}

#[test]
fn test_bbox_from_points_any_order() {
    let bbox = BoundingBox::from_points((250.0, -40.0), (-30.0, 60.0));
    assert_eq!(bbox, BoundingBox::new(-30.0, -40.0, 250.0, 60.0));
    assert_eq!(bbox.width(), 280.0);
    assert_eq!(bbox.height(), 100.0);
}

#[test]
fn test_bbox_center_off_origin() {
    let bbox = BoundingBox::new(100.0, -88.0, 140.0, -80.0);
    assert_eq!(bbox.center(), (120.0, -84.0));
}

#[test]
fn test_bbox_display() {
    let bbox = BoundingBox::new(-10.0, -5.5, 10.0, 5.5);
    assert_eq!(bbox.to_string(), "[-10, -5.5, 10, 5.5]");
}

#[test]
fn test_bbox_serde_round_trip() {
    let bbox = BoundingBox::new(1.5, 2.5, 3.5, 4.5);
    let json = serde_json::to_string(&bbox).unwrap();
    let back: BoundingBox = serde_json::from_str(&json).unwrap();
    assert_eq!(bbox, back);
}
