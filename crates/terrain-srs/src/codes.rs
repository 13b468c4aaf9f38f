//! GeoTIFF coordinate transformation codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code reserved for user-defined coordinate systems.
pub const CODE_USER_DEFINED: i32 = 32767;

/// Code meaning "not specified".
pub const CODE_UNDEFINED: i32 = 0;

/// Projection family selector, numbered as in the GeoTIFF specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransformCode {
    #[default]
    Undefined = 0,
    TransverseMercator = 1,
    TransvMercatorModifiedAlaska = 2,
    ObliqueMercator = 3,
    ObliqueMercatorLaborde = 4,
    ObliqueMercatorRosenmund = 5,
    ObliqueMercatorSpherical = 6,
    Mercator = 7,
    LambertConfConic2SP = 8,
    LambertConfConicHelmert = 9,
    LambertAzimEqualArea = 10,
    AlbersEqualArea = 11,
    AzimuthalEquidistant = 12,
    EquidistantConic = 13,
    Stereographic = 14,
    PolarStereographic = 15,
    ObliqueStereographic = 16,
    Equirectangular = 17,
    CassiniSoldner = 18,
    Gnomonic = 19,
    MillerCylindrical = 20,
    Orthographic = 21,
    Polyconic = 22,
    Robinson = 23,
    Sinusoidal = 24,
    VanDerGrinten = 25,
    NewZealandMapGrid = 26,
    TransvMercatorSouthOriented = 27,
    CylindricalEqualArea = 28,
}

impl TransformCode {
    /// All codes in numeric order.
    pub const ALL: [TransformCode; 29] = [
        TransformCode::Undefined,
        TransformCode::TransverseMercator,
        TransformCode::TransvMercatorModifiedAlaska,
        TransformCode::ObliqueMercator,
        TransformCode::ObliqueMercatorLaborde,
        TransformCode::ObliqueMercatorRosenmund,
        TransformCode::ObliqueMercatorSpherical,
        TransformCode::Mercator,
        TransformCode::LambertConfConic2SP,
        TransformCode::LambertConfConicHelmert,
        TransformCode::LambertAzimEqualArea,
        TransformCode::AlbersEqualArea,
        TransformCode::AzimuthalEquidistant,
        TransformCode::EquidistantConic,
        TransformCode::Stereographic,
        TransformCode::PolarStereographic,
        TransformCode::ObliqueStereographic,
        TransformCode::Equirectangular,
        TransformCode::CassiniSoldner,
        TransformCode::Gnomonic,
        TransformCode::MillerCylindrical,
        TransformCode::Orthographic,
        TransformCode::Polyconic,
        TransformCode::Robinson,
        TransformCode::Sinusoidal,
        TransformCode::VanDerGrinten,
        TransformCode::NewZealandMapGrid,
        TransformCode::TransvMercatorSouthOriented,
        TransformCode::CylindricalEqualArea,
    ];

    /// Look up a numeric code. Returns `None` outside 0..=28.
    pub fn from_code(code: i32) -> Option<TransformCode> {
        usize::try_from(code)
            .ok()
            .and_then(|i| TransformCode::ALL.get(i))
            .copied()
    }

    /// Numeric GeoTIFF code.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn is_defined(&self) -> bool {
        *self != TransformCode::Undefined
    }

    /// Canonical name, e.g. `"LambertConfConic2SP"`.
    pub fn name(&self) -> &'static str {
        match self {
            TransformCode::Undefined => "none",
            TransformCode::TransverseMercator => "TransverseMercator",
            TransformCode::TransvMercatorModifiedAlaska => "TransvMercatorModified_Alaska",
            TransformCode::ObliqueMercator => "ObliqueMercator",
            TransformCode::ObliqueMercatorLaborde => "ObliqueMercatorLaborde",
            TransformCode::ObliqueMercatorRosenmund => "ObliqueMercatorRosenmund",
            TransformCode::ObliqueMercatorSpherical => "ObliqueMercatorSpherical",
            TransformCode::Mercator => "Mercator",
            TransformCode::LambertConfConic2SP => "LambertConfConic2SP",
            TransformCode::LambertConfConicHelmert => "LambertConfConicHelmert",
            TransformCode::LambertAzimEqualArea => "LambertAzimEqualArea",
            TransformCode::AlbersEqualArea => "AlbersEqualArea",
            TransformCode::AzimuthalEquidistant => "AzimuthalEquidistant",
            TransformCode::EquidistantConic => "EquidistantConic",
            TransformCode::Stereographic => "Stereographic",
            TransformCode::PolarStereographic => "PolarStereographic",
            TransformCode::ObliqueStereographic => "ObliqueStereographic",
            TransformCode::Equirectangular => "Equirectangular",
            TransformCode::CassiniSoldner => "CassiniSoldner",
            TransformCode::Gnomonic => "Gnomonic",
            TransformCode::MillerCylindrical => "MillerCylindrical",
            TransformCode::Orthographic => "Orthographic",
            TransformCode::Polyconic => "Polyconic",
            TransformCode::Robinson => "Robinson",
            TransformCode::Sinusoidal => "Sinusoidal",
            TransformCode::VanDerGrinten => "VanDerGrinten",
            TransformCode::NewZealandMapGrid => "NewZealandMapGrid",
            TransformCode::TransvMercatorSouthOriented => "TransvMercatorSouthOriented",
            TransformCode::CylindricalEqualArea => "CylindricalEqualArea",
        }
    }

    /// Find a code by name, ignoring case and spaces.
    ///
    /// Unknown names map to `Undefined`.
    pub fn from_name(name: &str) -> TransformCode {
        let wanted: String = name
            .chars()
            .filter(|c| *c != ' ')
            .collect::<String>()
            .to_lowercase();
        TransformCode::ALL
            .iter()
            .find(|code| code.name().to_lowercase() == wanted)
            .copied()
            .unwrap_or_default()
    }
}

impl fmt::Display for TransformCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
