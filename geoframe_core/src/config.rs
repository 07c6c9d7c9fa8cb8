//! Converter configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, ProjectionError};
use crate::projection::{GeodeticPoint, LocalCartesianProjector, DEFAULT_MAX_RADIUS_M};

/// Configuration for a conversion session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Map origin; anchors the local frame of all telemetry
    pub origin: GeodeticPoint,

    /// Radius (meters) within which the flat-earth approximation is trusted
    pub max_radius_m: f64,

    /// Fail conversions outside `max_radius_m` instead of warning
    pub strict_range: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            max_radius_m: DEFAULT_MAX_RADIUS_M,
            strict_range: false,
        }
    }
}

/// Karlsruhe test track
fn default_origin() -> GeodeticPoint {
    GeodeticPoint::new_unchecked(49.011212804408, 8.4228850417969, 115.0)
}

impl ConverterConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;

        info!("Loaded config from {} (origin {})", path.display(), config.origin);
        Ok(config)
    }

    /// Check that the config describes a usable projector.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        self.projector().map(|_| ())
    }

    /// Build the projector this config describes.
    pub fn projector(&self) -> Result<LocalCartesianProjector, ProjectionError> {
        Ok(LocalCartesianProjector::new(self.origin)?
            .with_max_radius(self.max_radius_m)?
            .with_strict_range(self.strict_range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();

        assert_eq!(config.origin.latitude(), 49.011212804408);
        assert_eq!(config.max_radius_m, DEFAULT_MAX_RADIUS_M);
        assert!(!config.strict_range);
        assert!(config.validate().is_ok());

        let projector = config.projector().unwrap();
        assert_eq!(projector.origin(), config.origin);
        assert!(!projector.is_strict());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ConverterConfig = serde_json::from_str(r#"{"strict_range": true}"#).unwrap();

        assert!(config.strict_range);
        assert_eq!(config.origin, default_origin());
        assert!(config.projector().unwrap().is_strict());
    }

    #[test]
    fn test_invalid_radius() {
        for max_radius_m in [-5.0, 0.0, f64::NAN] {
            let config = ConverterConfig { max_radius_m, ..Default::default() };
            assert!(matches!(
                config.validate(),
                Err(ProjectionError::InvalidCoordinate { field: "max_radius_m", .. })
            ));
        }
    }

    #[test]
    fn test_pole_origin_invalid() {
        let config = ConverterConfig {
            origin: GeodeticPoint::new(-90.0, 0.0, 0.0).unwrap(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"origin": {{"latitude": 37.7749, "longitude": -122.4194, "altitude": 10.0}}, "max_radius_m": 20000.0}}"#
        )
        .unwrap();

        let config = ConverterConfig::from_file(file.path()).unwrap();

        assert_eq!(config.origin.longitude(), -122.4194);
        assert_eq!(config.max_radius_m, 20_000.0);
        assert_eq!(config.projector().unwrap().max_radius_m(), 20_000.0);
    }

    #[test]
    fn test_from_file_errors() {
        assert!(matches!(
            ConverterConfig::from_file("/nonexistent/geoframe.json"),
            Err(ConfigError::Io(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"origin": {{"latitude": 123.0, "longitude": 0.0}}}}"#).unwrap();
        let result = ConverterConfig::from_file(file.path());

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
