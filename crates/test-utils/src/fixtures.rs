//! Common test fixtures for terrain spatial-reference tests.
//!
//! Rasters are described by their pixel size and geographic extent, and
//! persisted metadata as plain key/value pairs so any crate can load them
//! into its own property map.

/// Geographic rasters, before any projection is applied.
pub mod raster {
    /// A raster in plain longitude/latitude.
    #[derive(Debug, Clone, Copy)]
    pub struct GeographicRaster {
        pub width: u32,
        pub length: u32,
        pub min_lon: f64,
        pub max_lon: f64,
        pub min_lat: f64,
        pub max_lat: f64,
    }

    impl GeographicRaster {
        /// Upper-left corner as (lon, lat, 0).
        pub fn tie_point(&self) -> (f64, f64, f64) {
            (self.min_lon, self.max_lat, 0.0)
        }

        /// Degrees per pixel as (dx, dy, 1).
        pub fn scale(&self) -> (f64, f64, f64) {
            (
                (self.max_lon - self.min_lon) / self.width as f64,
                (self.max_lat - self.min_lat) / self.length as f64,
                1.0,
            )
        }

        /// Extent as (min_lon, min_lat, max_lon, max_lat).
        pub fn bbox(&self) -> (f64, f64, f64, f64) {
            (self.min_lon, self.min_lat, self.max_lon, self.max_lat)
        }
    }

    /// 1000x500 pixels around the origin, 0.02 degrees per pixel.
    pub const EQUATORIAL: GeographicRaster = GeographicRaster {
        width: 1000,
        length: 500,
        min_lon: -10.0,
        max_lon: 10.0,
        min_lat: -5.0,
        max_lat: 5.0,
    };

    /// Reaches past 85 degrees south.
    pub const SOUTH_POLAR: GeographicRaster = GeographicRaster {
        width: 400,
        length: 100,
        min_lon: 0.0,
        max_lon: 40.0,
        min_lat: -87.0,
        max_lat: -77.0,
    };

    /// Reaches past 85 degrees north.
    pub const NORTH_POLAR: GeographicRaster = GeographicRaster {
        width: 400,
        length: 100,
        min_lon: 100.0,
        max_lon: 140.0,
        min_lat: 77.0,
        max_lat: 87.0,
    };

    /// Touches both thresholds exactly, which does not count as polar.
    pub const THRESHOLD_EDGE: GeographicRaster = GeographicRaster {
        width: 360,
        length: 170,
        min_lon: -180.0,
        max_lon: 180.0,
        min_lat: -85.0,
        max_lat: 85.0,
    };
}

/// Persisted metadata as key/value pairs.
pub mod properties {
    /// Unprojected Mars raster matching [`super::raster::EQUATORIAL`].
    pub const MARS_GEOGRAPHIC: &[(&str, &str)] = &[
        ("ProjectionInfo.Projected", "false"),
        ("ProjectionInfo.TiePoint", "-10,5,0"),
        ("ProjectionInfo.Scale", "0.02,0.02,1"),
        ("ProjectionInfo.Globe", "Mars"),
        ("ProjectionInfo.RasterWidth", "1000"),
        ("ProjectionInfo.RasterLength", "500"),
    ];

    /// Projected Mars equirectangular DEM with explicit axes.
    pub const MARS_EQUIRECTANGULAR: &[(&str, &str)] = &[
        ("ProjectionInfo.Projected", "true"),
        ("ProjectionInfo.TiePoint", "-118560,59280,0"),
        ("ProjectionInfo.Scale", "1,1,1"),
        ("ProjectionInfo.Globe", "Mars"),
        ("ProjectionInfo.RasterWidth", "1024"),
        ("ProjectionInfo.RasterLength", "2048"),
        ("ProjectionInfo.CoordTransformCode", "17"),
        ("ProjectionInfo.CenterLon", "0"),
        ("ProjectionInfo.CenterLat", "0"),
        ("ProjectionInfo.SemiMajorAxis", "3396190"),
        ("ProjectionInfo.SemiMinorAxis", "3396190"),
        ("ProjectionInfo.PCSCitation", "Equirectangular MARS"),
    ];

    /// Earth Web Mercator tile written without a transform code.
    pub const WEB_MERCATOR: &[(&str, &str)] = &[
        ("ProjectionInfo.Projected", "true"),
        ("ProjectionInfo.TiePoint", "-20037508.34,20037508.34,0"),
        ("ProjectionInfo.Scale", "156543.03,156543.03,1"),
        ("ProjectionInfo.Globe", "Earth"),
        ("ProjectionInfo.RasterWidth", "256"),
        ("ProjectionInfo.RasterLength", "256"),
        ("ProjectionInfo.ProjectionCoordinateSystemCode", "3857"),
        ("ProjectionInfo.PCSCitation", "WGS 84 / Pseudo-Mercator"),
    ];

    /// Older file that stores the raster length as `RasterHeight`.
    pub const LEGACY_HEIGHT: &[(&str, &str)] = &[
        ("ProjectionInfo.Projected", "true"),
        ("ProjectionInfo.TiePoint", "0,100,0"),
        ("ProjectionInfo.Scale", "2,2,1"),
        ("ProjectionInfo.Globe", "Moon"),
        ("ProjectionInfo.RasterWidth", "50"),
        ("ProjectionInfo.RasterHeight", "40"),
        ("ProjectionInfo.CoordTransformCode", "24"),
    ];
}

/// Coordinate samples in degrees.
pub mod coords {
    /// Non-polar (lon, lat) points away from any projection singularity.
    pub const MID_LATITUDE: [(f64, f64); 6] = [
        (0.0, 0.0),
        (5.25, -3.5),
        (-9.75, 4.75),
        (45.0, 30.0),
        (-120.0, -45.0),
        (170.0, 60.0),
    ];
}
