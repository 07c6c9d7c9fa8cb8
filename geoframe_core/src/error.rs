//! Error types for GeoFrame projection and pose conversion.

use thiserror::Error;

/// Errors raised by the local tangent-plane projector.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// A coordinate was NaN, infinite, or outside its valid range
    #[error("Invalid coordinate: {field} = {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },

    /// Point lies outside the radius where the flat-earth approximation holds
    #[error("Point is {distance_m:.1}m from origin, beyond the {max_radius_m:.1}m validity radius")]
    OutOfRange { distance_m: f64, max_radius_m: f64 },
}

impl ProjectionError {
    /// Creates an invalid coordinate error.
    pub fn invalid(field: &'static str, value: f64) -> Self {
        Self::InvalidCoordinate { field, value }
    }

    /// Returns true for the non-fatal range diagnostic.
    pub fn is_range_warning(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Errors raised while converting telemetry frames.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Position could not be projected
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Orientation quaternion has zero or non-finite norm
    #[error("Invalid orientation quaternion: [{x}, {y}, {z}, {w}]")]
    InvalidOrientation { x: f64, y: f64, z: f64, w: f64 },
}

/// Errors raised by the procedural lane generators.
#[derive(Debug, Error)]
pub enum LaneError {
    /// A lane needs at least one segment
    #[error("Lane geometry requires at least one segment")]
    NoSegments,

    /// Generated vertex could not be projected
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),
}

/// Errors raised while loading converter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::ConverterConfig`]
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config values describe an unusable projector
    #[error("Invalid config: {0}")]
    Invalid(#[from] ProjectionError),
}
