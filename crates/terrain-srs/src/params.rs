//! Optional projection parameters.

use serde::{Deserialize, Serialize};

/// Which pole a polar projection is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoleLatitude {
    #[default]
    North,
    South,
}

impl PoleLatitude {
    /// Signed latitude of the pole in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            PoleLatitude::North => 90.0,
            PoleLatitude::South => -90.0,
        }
    }

    /// Pole on the same side of the equator as `latitude`.
    pub fn from_sign(latitude: f64) -> Self {
        if latitude < 0.0 {
            PoleLatitude::South
        } else {
            PoleLatitude::North
        }
    }
}

/// Angular values are degrees, offsets are in the projection's linear units.
///
/// `None` means the raster did not supply the value. Each family builder reads
/// only the subset it needs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionParameters {
    pub std_parallel_1: Option<f64>,
    pub std_parallel_2: Option<f64>,
    pub natural_origin_lon: Option<f64>,
    pub natural_origin_lat: Option<f64>,
    pub false_origin_lon: Option<f64>,
    pub false_origin_lat: Option<f64>,
    pub false_easting: Option<f64>,
    pub false_northing: Option<f64>,
    pub center_easting: Option<f64>,
    pub center_northing: Option<f64>,
    pub center_lon: Option<f64>,
    pub center_lat: Option<f64>,
    pub scale_at_natural_origin: Option<f64>,
    pub scale_at_center: Option<f64>,
    pub azimuth: Option<f64>,
    pub straight_vert_pole_lon: Option<f64>,
    pub pole_latitude: PoleLatitude,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pole_from_sign() {
        assert_eq!(PoleLatitude::from_sign(-71.0), PoleLatitude::South);
        assert_eq!(PoleLatitude::from_sign(0.0), PoleLatitude::North);
        assert_eq!(PoleLatitude::South.degrees(), -90.0);
    }

    #[test]
    fn test_default_is_all_unset() {
        let params = ProjectionParameters::default();
        assert!(params.center_lon.is_none());
        assert!(params.false_easting.is_none());
        assert_eq!(params.pole_latitude, PoleLatitude::North);
    }
}
