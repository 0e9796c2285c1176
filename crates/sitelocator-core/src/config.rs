use crate::error::{LocatorError, Result};
use crate::models::{PathDistance, DEFAULT_BUFFER_METERS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the site locator
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Radius used when a search has an origin but no explicit radius
    pub radius_miles: ConfigValue<f64>,
    /// Result cap applied after all filtering; 0 disables the cap
    pub max_results: ConfigValue<usize>,
    /// Whether a search with no origin and no drawn path yields nothing
    pub require_location: ConfigValue<bool>,
    /// Buffer for drawn paths that do not carry one
    pub buffer_meters: ConfigValue<f64>,
    pub path_distance: ConfigValue<PathDistance>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            radius_miles: ConfigValue::new(10.0, ConfigSource::Default),
            max_results: ConfigValue::new(100, ConfigSource::Default),
            require_location: ConfigValue::new(true, ConfigSource::Default),
            buffer_meters: ConfigValue::new(DEFAULT_BUFFER_METERS, ConfigSource::Default),
            path_distance: ConfigValue::new(PathDistance::Endpoints, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| LocatorError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| LocatorError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(radius) = file_config.radius_miles {
            self.radius_miles.update(validate_positive("radius_miles", radius)?, ConfigSource::File);
        }

        if let Some(max_results) = file_config.max_results {
            self.max_results.update(max_results, ConfigSource::File);
        }

        if let Some(require_location) = file_config.require_location {
            self.require_location.update(require_location, ConfigSource::File);
        }

        if let Some(buffer) = file_config.buffer_meters {
            self.buffer_meters.update(validate_positive("buffer_meters", buffer)?, ConfigSource::File);
        }

        if let Some(path_distance) = file_config.path_distance {
            self.path_distance.update(path_distance, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(radius_str) = env::var("SITELOCATOR_RADIUS_MILES") {
            match parse_positive("radius_miles", &radius_str) {
                Ok(radius) => self.radius_miles.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SITELOCATOR_RADIUS_MILES value '{}': expected a positive number",
                    radius_str
                ),
            }
        }

        if let Ok(max_str) = env::var("SITELOCATOR_MAX_RESULTS") {
            match max_str.trim().parse::<usize>() {
                Ok(max) => self.max_results.update(max, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SITELOCATOR_MAX_RESULTS value '{}': expected a non-negative integer",
                    max_str
                ),
            }
        }

        if let Ok(require_str) = env::var("SITELOCATOR_REQUIRE_LOCATION") {
            match parse_bool(&require_str) {
                Ok(require) => self.require_location.update(require, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SITELOCATOR_REQUIRE_LOCATION value '{}': expected true or false",
                    require_str
                ),
            }
        }

        if let Ok(buffer_str) = env::var("SITELOCATOR_BUFFER_METERS") {
            match parse_positive("buffer_meters", &buffer_str) {
                Ok(buffer) => self.buffer_meters.update(buffer, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SITELOCATOR_BUFFER_METERS value '{}': expected a positive number",
                    buffer_str
                ),
            }
        }

        if let Ok(mode_str) = env::var("SITELOCATOR_PATH_DISTANCE") {
            match mode_str.parse::<PathDistance>() {
                Ok(mode) => self.path_distance.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SITELOCATOR_PATH_DISTANCE value '{}': expected endpoints or segment",
                    mode_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(radius) = overrides.radius_miles {
            self.radius_miles.update(radius, ConfigSource::Cli);
        }

        if let Some(max_results) = overrides.max_results {
            self.max_results.update(max_results, ConfigSource::Cli);
        }

        if let Some(require_location) = overrides.require_location {
            self.require_location.update(require_location, ConfigSource::Cli);
        }

        if let Some(buffer) = overrides.buffer_meters {
            self.buffer_meters.update(buffer, ConfigSource::Cli);
        }

        if let Some(path_distance) = overrides.path_distance {
            self.path_distance.update(path_distance, ConfigSource::Cli);
        }
    }

    /// Result cap, with 0 meaning unlimited
    pub fn result_limit(&self) -> Option<usize> {
        match self.max_results.value {
            0 => None,
            n => Some(n),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "radius_miles".to_string(),
            (self.radius_miles.value.to_string(), self.radius_miles.source),
        );

        map.insert(
            "max_results".to_string(),
            (self.max_results.value.to_string(), self.max_results.source),
        );

        map.insert(
            "require_location".to_string(),
            (self.require_location.value.to_string(), self.require_location.source),
        );

        map.insert(
            "buffer_meters".to_string(),
            (self.buffer_meters.value.to_string(), self.buffer_meters.source),
        );

        map.insert(
            "path_distance".to_string(),
            (format!("{:?}", self.path_distance.value).to_lowercase(), self.path_distance.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    radius_miles: Option<f64>,
    max_results: Option<usize>,
    require_location: Option<bool>,
    buffer_meters: Option<f64>,
    path_distance: Option<PathDistance>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub radius_miles: Option<f64>,
    pub max_results: Option<usize>,
    pub require_location: Option<bool>,
    pub buffer_meters: Option<f64>,
    pub path_distance: Option<PathDistance>,
}

/// Parse a strictly positive, finite number
pub fn parse_positive(key: &str, s: &str) -> Result<f64> {
    let value = s.trim().parse::<f64>().map_err(|_| LocatorError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("Invalid number: {}", s),
    })?;
    validate_positive(key, value)
}

fn validate_positive(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LocatorError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Must be a positive number, got {}", value),
        })
    }
}

/// Parse a boolean switch
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LocatorError::ConfigInvalid {
            key: "require_location".to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.radius_miles.value, 10.0);
        assert_eq!(config.radius_miles.source, ConfigSource::Default);
        assert_eq!(config.max_results.value, 100);
        assert!(config.require_location.value);
        assert_eq!(config.path_distance.value, PathDistance::Endpoints);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
radius_miles = 25.0
max_results = 0
require_location = false
buffer_meters = 500.0
path_distance = "segment"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.radius_miles.value, 25.0);
        assert_eq!(config.radius_miles.source, ConfigSource::File);
        assert_eq!(config.result_limit(), None);
        assert!(!config.require_location.value);
        assert_eq!(config.buffer_meters.value, 500.0);
        assert_eq!(config.path_distance.value, PathDistance::Segment);
    }

    #[test]
    fn test_file_rejects_non_positive_radius() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "radius_miles = -3.0").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LocatorError::ConfigInvalid { ref key, .. } if key == "radius_miles"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            radius_miles: Some(5.0),
            require_location: Some(false),
            ..Default::default()
        };

        config.update_from_cli(overrides);

        assert_eq!(config.radius_miles.value, 5.0);
        assert_eq!(config.radius_miles.source, ConfigSource::Cli);
        assert!(!config.require_location.value);
        // These should still be defaults
        assert_eq!(config.max_results.source, ConfigSource::Default);
        assert_eq!(config.path_distance.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_positive("radius_miles", " 2.5 ").unwrap(), 2.5);
        assert!(parse_positive("radius_miles", "0").is_err());
        assert!(parse_positive("radius_miles", "far").is_err());
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert_eq!(map.len(), 5);
        let (max_value, max_source) = &map["max_results"];
        assert_eq!(max_value, "100");
        assert_eq!(*max_source, ConfigSource::Default);
    }
}
