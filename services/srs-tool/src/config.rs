//! Tool configuration.

use std::env;

/// Globe assumed for metadata files that do not name one.
pub const DEFAULT_GLOBE: &str = "Mars";

/// Settings read from the environment, overridable from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Body written for files missing `ProjectionInfo.Globe`
    pub default_globe: String,

    /// trace, debug, info, warn or error
    pub log_level: String,

    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_globe: DEFAULT_GLOBE.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ToolConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SRS_DEFAULT_GLOBE`: default globe (Mars)
    /// - `SRS_LOG_LEVEL`: log level (info)
    /// - `SRS_LOG_FORMAT`: `json` for JSON logs, anything else for text
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_globe: lookup("SRS_DEFAULT_GLOBE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_globe),
            log_level: lookup("SRS_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logs: lookup("SRS_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        globe: Option<String>,
        log_level: Option<String>,
        json_logs: bool,
    ) -> Self {
        if let Some(globe) = globe {
            self.default_globe = globe;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self.json_logs |= json_logs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ToolConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.default_globe, "Mars");
    }

    #[test]
    fn test_env_values() {
        let config = ToolConfig::from_lookup(lookup(&[
            ("SRS_DEFAULT_GLOBE", "Moon"),
            ("SRS_LOG_LEVEL", "debug"),
            ("SRS_LOG_FORMAT", "JSON"),
        ]));
        assert_eq!(config.default_globe, "Moon");
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = ToolConfig::from_lookup(lookup(&[("SRS_DEFAULT_GLOBE", "Moon")]))
            .with_overrides(Some("Earth".to_string()), None, true);
        assert_eq!(config.default_globe, "Earth");
        assert_eq!(config.log_level, "info");
        assert!(config.json_logs);
    }
}
