//! Persisted key/value metadata.
//!
//! Raster metadata is stored as a flat string map. On disk it may be a
//! Java-style `.properties` file, a JSON object or a YAML mapping; the file
//! extension decides which.

use serde::{Deserialize, Serialize};
use srs_common::{SrsError, SrsResult};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

/// Property keys, all under the `ProjectionInfo.` prefix.
pub mod keys {
    pub const PREFIX: &str = "ProjectionInfo.";

    pub const PROJECTED: &str = "ProjectionInfo.Projected";
    pub const TIE_POINT: &str = "ProjectionInfo.TiePoint";
    pub const SCALE: &str = "ProjectionInfo.Scale";
    pub const GLOBE: &str = "ProjectionInfo.Globe";
    pub const RASTER_WIDTH: &str = "ProjectionInfo.RasterWidth";
    pub const RASTER_LENGTH: &str = "ProjectionInfo.RasterLength";
    /// Older files stored the length under this name.
    pub const RASTER_HEIGHT: &str = "ProjectionInfo.RasterHeight";

    pub const GCS_CODE: &str = "ProjectionInfo.GCSCode";
    pub const DATUM_CODE: &str = "ProjectionInfo.DatumCode";
    pub const ELLIPSOID_CODE: &str = "ProjectionInfo.EllipsoidCode";
    pub const PRIME_MERIDIAN_CODE: &str = "ProjectionInfo.PrimeMeridianCode";
    pub const PROJECTION_CODE: &str = "ProjectionInfo.ProjectionCode";
    pub const PCS_CODE: &str = "ProjectionInfo.ProjectionCoordinateSystemCode";
    pub const TRANSFORM_CODE: &str = "ProjectionInfo.CoordTransformCode";

    pub const SEMI_MAJOR_AXIS: &str = "ProjectionInfo.SemiMajorAxis";
    pub const SEMI_MINOR_AXIS: &str = "ProjectionInfo.SemiMinorAxis";
    pub const INVERSE_FLATTENING: &str = "ProjectionInfo.InverseFlattening";
    pub const GCS_PRIME_MERIDIAN_LON: &str = "ProjectionInfo.GCSPrimeMeridianLon";

    pub const STD_PARALLEL_1: &str = "ProjectionInfo.StdParallel1";
    pub const STD_PARALLEL_2: &str = "ProjectionInfo.StdParallel2";
    pub const NATURAL_ORIGIN_LON: &str = "ProjectionInfo.NaturalOriginLon";
    pub const NATURAL_ORIGIN_LAT: &str = "ProjectionInfo.NaturalOriginLat";
    pub const FALSE_ORIGIN_LON: &str = "ProjectionInfo.FalseOriginLon";
    pub const FALSE_ORIGIN_LAT: &str = "ProjectionInfo.FalseOriginLat";
    pub const FALSE_EASTING: &str = "ProjectionInfo.FalseEasting";
    pub const FALSE_NORTHING: &str = "ProjectionInfo.FalseNorthing";
    pub const CENTER_EASTING: &str = "ProjectionInfo.CenterEasting";
    pub const CENTER_NORTHING: &str = "ProjectionInfo.CenterNorthing";
    pub const CENTER_LON: &str = "ProjectionInfo.CenterLon";
    pub const CENTER_LAT: &str = "ProjectionInfo.CenterLat";
    pub const SCALE_AT_NATURAL_ORIGIN: &str = "ProjectionInfo.ScaleAtNaturalOrigin";
    pub const SCALE_AT_CENTER: &str = "ProjectionInfo.ScaleAtCenter";
    pub const AZIMUTH: &str = "ProjectionInfo.Azimuth";
    pub const STRAIGHT_VERT_POLE_LON: &str = "ProjectionInfo.StraightVertPoleLon";

    pub const GCS_CITATION: &str = "ProjectionInfo.GCSCitation";
    pub const PCS_CITATION: &str = "ProjectionInfo.PCSCitation";
    pub const PROJ_LINEAR_UNITS: &str = "ProjectionInfo.ProjLinearUnits";
}

/// File encodings understood by [`Properties::load`] and [`Properties::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesFormat {
    Text,
    Json,
    Yaml,
}

impl PropertiesFormat {
    /// Pick a format from a file extension; anything unrecognized is text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => PropertiesFormat::Json,
            Some("yaml") | Some("yml") => PropertiesFormat::Yaml,
            _ => PropertiesFormat::Text,
        }
    }
}

/// An ordered string-to-string map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of a key that must be present.
    pub fn require(&self, key: &str) -> SrsResult<&str> {
        self.get(key)
            .ok_or_else(|| SrsError::MissingProperty(key.to_string()))
    }

    /// Parse a present value. Blank values count as absent.
    pub fn parse_opt<T>(&self, key: &str) -> SrsResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|e: T::Err| {
                SrsError::InvalidProperty {
                    key: key.to_string(),
                    message: format!("'{}': {}", raw, e),
                }
            }),
        }
    }

    /// `true`/`false` in any case.
    pub fn get_bool(&self, key: &str) -> SrsResult<Option<bool>> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) if raw.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(raw) if raw.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(raw) => Err(SrsError::InvalidProperty {
                key: key.to_string(),
                message: format!("'{}' is not a boolean", raw),
            }),
        }
    }

    pub fn get_i32(&self, key: &str) -> SrsResult<Option<i32>> {
        self.parse_opt(key)
    }

    /// A number, with `NaN` and infinities treated as absent.
    pub fn get_f64(&self, key: &str) -> SrsResult<Option<f64>> {
        Ok(self.parse_opt::<f64>(key)?.filter(|v| v.is_finite()))
    }

    /// Comma-separated list of finite numbers.
    pub fn get_f64_list(&self, key: &str) -> SrsResult<Option<Vec<f64>>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        raw.split(',')
            .map(|part| {
                let value = part.trim().parse::<f64>().map_err(|e| SrsError::InvalidProperty {
                    key: key.to_string(),
                    message: format!("'{}': {}", raw, e),
                })?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(SrsError::InvalidProperty {
                        key: key.to_string(),
                        message: format!("'{}': components must be finite", raw),
                    })
                }
            })
            .collect::<SrsResult<Vec<_>>>()
            .map(Some)
    }

    pub fn set_f64_list(&mut self, key: &str, values: &[f64]) {
        let joined = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.set(key, joined);
    }

    /// Parse `.properties` text.
    ///
    /// Lines starting with `#` or `!` are comments. The key ends at the first
    /// unescaped `=`, `:` or whitespace. Backslash escapes are honored;
    /// line continuations are not.
    pub fn parse_text(text: &str) -> Self {
        let mut props = Properties::new();
        for line in text.lines() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = split_entry(line);
            props.set(unescape(key), unescape(value.trim_start()));
        }
        props
    }

    /// Serialize as `.properties` text with keys in sorted order.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            let _ = writeln!(out, "{}={}", escape(key, true), escape(value, false));
        }
        out
    }

    pub fn from_json(text: &str) -> SrsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> SrsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_yaml(text: &str) -> SrsResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self) -> SrsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read a file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> SrsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match PropertiesFormat::from_path(path) {
            PropertiesFormat::Text => Ok(Self::parse_text(&text)),
            PropertiesFormat::Json => Self::from_json(&text),
            PropertiesFormat::Yaml => Self::from_yaml(&text),
        }
    }

    /// Write a file, choosing the format from its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> SrsResult<()> {
        let path = path.as_ref();
        let text = match PropertiesFormat::from_path(path) {
            PropertiesFormat::Text => self.to_text(),
            PropertiesFormat::Json => self.to_json()?,
            PropertiesFormat::Yaml => self.to_yaml()?,
        };
        std::fs::write(path, text)?;
        Ok(())
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], &line[i + 1..]),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest
                    .strip_prefix('=')
                    .or_else(|| rest.strip_prefix(':'))
                    .unwrap_or(rest);
                return (&line[..i], rest);
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}
