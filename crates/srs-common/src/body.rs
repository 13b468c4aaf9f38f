//! Reference ellipsoids of solar-system bodies.
//!
//! Radii are in meters. Bodies without a measured flattening are treated as
//! spheres (equal equatorial and polar radii).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Equatorial and polar radius of a body's reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyRadii {
    /// Equatorial radius (meters)
    pub semi_major_axis: f64,
    /// Polar radius (meters)
    pub semi_minor_axis: f64,
}

impl BodyRadii {
    pub const fn new(semi_major_axis: f64, semi_minor_axis: f64) -> Self {
        Self {
            semi_major_axis,
            semi_minor_axis,
        }
    }

    /// Inverse flattening, or `None` for a sphere.
    pub fn inverse_flattening(&self) -> Option<f64> {
        let flattening = (self.semi_major_axis - self.semi_minor_axis) / self.semi_major_axis;
        if flattening == 0.0 {
            None
        } else {
            Some(1.0 / flattening)
        }
    }
}

/// Celestial bodies with a known reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Earth,
    Mars,
    Moon,
    Mercury,
    Venus,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Charon,
    Phoebe,
    Titan,
    Enceladus,
    Ganymede,
    Europa,
    Io,
    Phobos,
    Deimos,
}

/// The body table, in its fixed order.
const BODY_ELLIPSOIDS: [(Body, BodyRadii); 19] = [
    (Body::Earth, BodyRadii::new(6378137.0, 6356800.0)),
    (Body::Mars, BodyRadii::new(3396200.0, 3376200.0)),
    (Body::Moon, BodyRadii::new(1738140.0, 1735970.0)),
    (Body::Mercury, BodyRadii::new(2439700.0, 2439700.0)),
    (Body::Venus, BodyRadii::new(6051800.0, 6051800.0)),
    (Body::Jupiter, BodyRadii::new(71492000.0, 66854000.0)),
    (Body::Saturn, BodyRadii::new(60268000.0, 54364000.0)),
    (Body::Uranus, BodyRadii::new(25559000.0, 24973000.0)),
    (Body::Neptune, BodyRadii::new(24764000.0, 24341000.0)),
    (Body::Pluto, BodyRadii::new(1186000.0, 1186000.0)),
    (Body::Charon, BodyRadii::new(603000.0, 603000.0)),
    (Body::Phoebe, BodyRadii::new(106500.0, 106500.0)),
    (Body::Titan, BodyRadii::new(2576000.0, 2576000.0)),
    (Body::Enceladus, BodyRadii::new(252100.0, 252100.0)),
    (Body::Ganymede, BodyRadii::new(2634100.0, 2634100.0)),
    (Body::Europa, BodyRadii::new(1560800.0, 1560800.0)),
    (Body::Io, BodyRadii::new(1821600.0, 1821600.0)),
    (Body::Phobos, BodyRadii::new(11266.7, 11266.7)),
    (Body::Deimos, BodyRadii::new(6200.0, 6200.0)),
];

impl Body {
    /// All bodies in table order.
    pub const ALL: [Body; 19] = [
        Body::Earth,
        Body::Mars,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Charon,
        Body::Phoebe,
        Body::Titan,
        Body::Enceladus,
        Body::Ganymede,
        Body::Europa,
        Body::Io,
        Body::Phobos,
        Body::Deimos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Charon => "Charon",
            Body::Phoebe => "Phoebe",
            Body::Titan => "Titan",
            Body::Enceladus => "Enceladus",
            Body::Ganymede => "Ganymede",
            Body::Europa => "Europa",
            Body::Io => "Io",
            Body::Phobos => "Phobos",
            Body::Deimos => "Deimos",
        }
    }

    /// Find a body by name.
    ///
    /// An exact match wins; otherwise the name is compared ignoring ASCII case
    /// and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Body> {
        if let Some(body) = Body::ALL.iter().find(|b| b.name() == name) {
            return Some(*body);
        }
        let trimmed = name.trim();
        Body::ALL
            .iter()
            .find(|b| b.name().eq_ignore_ascii_case(trimmed))
            .copied()
    }

    /// Reference radii of this body.
    pub fn radii(&self) -> BodyRadii {
        BODY_ELLIPSOIDS[*self as usize].1
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = crate::SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::from_name(s).ok_or_else(|| crate::SrsError::UnknownBody(s.to_string()))
    }
}

/// Look up the radii for a body name.
pub fn lookup(name: &str) -> Option<BodyRadii> {
    Body::from_name(name).map(|b| b.radii())
}
