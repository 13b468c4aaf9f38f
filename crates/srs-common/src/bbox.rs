//! Bounding box types and operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic or projected bounding box.
///
/// For an unprojected raster, coordinates are longitude/latitude in degrees.
/// For a projected raster, coordinates are in the projection's linear units.
///
/// No wraparound handling is done: a box crossing the antimeridian or a pole
/// is stored exactly as its corner coordinates describe it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing two arbitrary corner points.
    pub fn from_points(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            min_x: a.0.min(b.0),
            min_y: a.1.min(b.1),
            max_x: a.0.max(b.0),
            max_y: a.1.max(b.1),
        }
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box as (x, y).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Upper-left corner as (min_x, max_y).
    pub fn upper_left(&self) -> (f64, f64) {
        (self.min_x, self.max_y)
    }

    /// Lower-right corner as (max_x, min_y).
    pub fn lower_right(&self) -> (f64, f64) {
        (self.max_x, self.min_y)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
