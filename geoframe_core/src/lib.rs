//! GeoFrame Core - Local Tangent-Plane Projection for Vehicle Telemetry
//!
//! Vehicle loggers record poses in meters relative to a map origin, while
//! map-based viewers want latitude/longitude. This library bridges the two:
//! 1. **Projection**: origin-anchored ENU frame <-> WGS84 geodetic coordinates
//! 2. **Conversion**: telemetry frames -> vehicle pose + trajectory streams
//! 3. **Lane geometry**: procedural test paths around a geodetic anchor

pub mod config;
pub mod converter;
pub mod error;
pub mod lane;
pub mod orientation;
pub mod projection;
pub mod telemetry;

// Re-export key types for convenience
pub use config::ConverterConfig;
pub use converter::{ConvertedFrame, PoseConverter, TrajectoryPrimitive, VehiclePose};
pub use error::{ConfigError, ConvertError, LaneError, ProjectionError};
pub use lane::LaneGeometry;
pub use projection::{GeodeticPoint, LocalCartesianProjector, LocalPoint, Wgs84};
pub use telemetry::TelemetryFrame;
