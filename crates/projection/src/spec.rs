//! PROJ-style projection specification strings.
//!
//! A spec is an ordered list of `+key=value` and `+flag` tokens separated by
//! single spaces, e.g. `+proj=stere +lat_0=-90 +lon_0=0 +k_0=1 +no_defs`.

use std::fmt;

/// An ordered projection specification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjSpec {
    tokens: Vec<(String, Option<String>)>,
}

impl ProjSpec {
    /// Start a spec for the named projection (`+proj=<name>`).
    pub fn new(proj: &str) -> Self {
        Self {
            tokens: vec![("proj".to_string(), Some(proj.to_string()))],
        }
    }

    /// Geographic longitude/latitude spec on an ellipsoid with the given axes.
    pub fn longlat(semi_major_axis: f64, semi_minor_axis: f64) -> Self {
        Self::new("longlat").ellipsoid(semi_major_axis, semi_minor_axis)
    }

    /// Reference to a well-known coordinate system (`+init=epsg:<code>`).
    pub fn epsg(code: i32) -> Self {
        Self {
            tokens: vec![("init".to_string(), Some(format!("epsg:{}", code)))],
        }
    }

    /// Append a numeric `+key=value` parameter.
    pub fn param(mut self, key: &str, value: f64) -> Self {
        self.tokens
            .push((key.to_string(), Some(format_value(value))));
        self
    }

    /// Append a valueless `+flag` token.
    pub fn flag(mut self, key: &str) -> Self {
        self.tokens.push((key.to_string(), None));
        self
    }

    /// Append the ellipsoid axes and the "no implicit defaults" flag.
    pub fn ellipsoid(self, semi_major_axis: f64, semi_minor_axis: f64) -> Self {
        self.param("a", semi_major_axis)
            .param("b", semi_minor_axis)
            .flag("no_defs")
    }

    /// Parse a spec string into its tokens.
    ///
    /// Tokens without a leading `+` are accepted as-is; empty input yields an
    /// empty spec.
    pub fn parse(spec: &str) -> Self {
        let tokens = spec
            .split_whitespace()
            .map(|token| {
                let token = token.trim_start_matches('+');
                match token.split_once('=') {
                    Some((key, value)) => (key.to_string(), Some(value.to_string())),
                    None => (token.to_string(), None),
                }
            })
            .collect();
        Self { tokens }
    }

    /// Value of a `+key=value` token, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Numeric value of a `+key=value` token, if present and parseable.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// True if the token is present, with or without a value.
    pub fn has(&self, key: &str) -> bool {
        self.tokens.iter().any(|(k, _)| k == key)
    }

    /// Projection name (`+proj=`), if any.
    pub fn proj_name(&self) -> Option<&str> {
        self.get("proj")
    }

    /// True for a geographic longitude/latitude spec.
    pub fn is_geographic(&self) -> bool {
        matches!(self.proj_name(), Some("longlat" | "latlong" | "lonlat" | "latlon"))
    }

    /// EPSG code of a `+init=epsg:<code>` reference.
    pub fn epsg_code(&self) -> Option<&str> {
        self.get("init").and_then(|v| {
            v.strip_prefix("epsg:")
                .or_else(|| v.strip_prefix("EPSG:"))
        })
    }
}

impl fmt::Display for ProjSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match value {
                Some(value) => write!(f, "+{}={}", key, value)?,
                None => write!(f, "+{}", key)?,
            }
        }
        Ok(())
    }
}

/// Shortest decimal that round-trips; negative zero is written as 0.
fn format_value(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
