//! The projection engine - local tangent plane <-> geodetic coordinates
//!
//! Anchors an East-North-Up (ENU) frame at a fixed origin and converts
//! between that frame (meters) and WGS84 latitude/longitude/altitude.
//!
//! The mapping is a flat-earth linearisation: degrees are scaled by the
//! meridian and prime-vertical radii of curvature evaluated at the origin
//! latitude. Within 10 km of the origin (below 60 degrees latitude) the
//! horizontal error stays under 0.5% of the distance. Beyond the configured
//! validity radius (50 km by default) conversions are flagged as out of range.

use geo::{HaversineDistance, Point};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ProjectionError;

/// Default radius (meters) inside which the tangent-plane approximation is trusted
pub const DEFAULT_MAX_RADIUS_M: f64 = 50_000.0;

/// WGS84 reference ellipsoid
pub struct Wgs84;

impl Wgs84 {
    /// Semi-major axis (equatorial radius) in meters
    pub const A: f64 = 6_378_137.0;

    /// Flattening
    pub const F: f64 = 1.0 / 298.257_223_563;

    /// First eccentricity squared
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;
}

fn finite(field: &'static str, value: f64) -> Result<f64, ProjectionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::invalid(field, value))
    }
}

/// Wraps a longitude difference into [-180, 180).
fn wrap_delta(degrees: f64) -> f64 {
    if (-180.0..180.0).contains(&degrees) {
        degrees
    } else {
        (degrees + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Wraps an absolute longitude into [-180, 180], leaving in-range values untouched.
fn wrap_longitude(degrees: f64) -> f64 {
    if (-180.0..=180.0).contains(&degrees) {
        degrees
    } else {
        wrap_delta(degrees)
    }
}

// =============================================================================
// VALUE TYPES
// =============================================================================

/// A validated WGS84 position.
///
/// Latitude and longitude are in decimal degrees, altitude in meters.
/// Construction rejects non-finite values and out-of-range angles, so every
/// `GeodeticPoint` in circulation is well formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeodetic", into = "RawGeodetic")]
pub struct GeodeticPoint {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

/// Wire shape of [`GeodeticPoint`]; validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGeodetic {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: f64,
}

impl GeodeticPoint {
    /// Creates a geodetic point.
    ///
    /// # Errors
    /// `InvalidCoordinate` if any value is NaN/infinite, latitude is outside
    /// [-90, 90] or longitude is outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self, ProjectionError> {
        let latitude = finite("latitude", latitude)?;
        let longitude = finite("longitude", longitude)?;
        let altitude = finite("altitude", altitude)?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ProjectionError::invalid("latitude", latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ProjectionError::invalid("longitude", longitude));
        }

        Ok(Self { latitude, longitude, altitude })
    }

    /// Skips validation; only for compile-time known coordinates.
    pub(crate) const fn new_unchecked(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Returns the same horizontal position at a different altitude.
    pub fn with_altitude(&self, altitude: f64) -> Result<Self, ProjectionError> {
        Self::new(self.latitude, self.longitude, altitude)
    }

    /// Great-circle surface distance to `other` in meters (mean earth radius).
    pub fn haversine_distance(&self, other: &GeodeticPoint) -> f64 {
        let a = Point::new(self.longitude, self.latitude);
        let b = Point::new(other.longitude, other.latitude);
        a.haversine_distance(&b)
    }
}

impl TryFrom<RawGeodetic> for GeodeticPoint {
    type Error = ProjectionError;

    fn try_from(raw: RawGeodetic) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude, raw.altitude)
    }
}

impl From<GeodeticPoint> for RawGeodetic {
    fn from(p: GeodeticPoint) -> Self {
        Self {
            latitude: p.latitude,
            longitude: p.longitude,
            altitude: p.altitude,
        }
    }
}

impl std::fmt::Display for GeodeticPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7}, {:.2}m)", self.latitude, self.longitude, self.altitude)
    }
}

/// A validated position in the origin's ENU frame (meters).
///
/// x = east, y = north, z = up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocal", into = "RawLocal")]
pub struct LocalPoint {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawLocal {
    x: f64,
    y: f64,
    #[serde(default)]
    z: f64,
}

impl LocalPoint {
    /// The frame origin.
    pub const ORIGIN: LocalPoint = LocalPoint { x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a local point, rejecting NaN/infinite components.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, ProjectionError> {
        Ok(Self {
            x: finite("x", x)?,
            y: finite("y", y)?,
            z: finite("z", z)?,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Horizontal (east/north) distance from the frame origin.
    pub fn horizontal_distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl TryFrom<RawLocal> for LocalPoint {
    type Error = ProjectionError;

    fn try_from(raw: RawLocal) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y, raw.z)
    }
}

impl From<LocalPoint> for RawLocal {
    fn from(p: LocalPoint) -> Self {
        Self { x: p.x, y: p.y, z: p.z }
    }
}

impl TryFrom<Vector3<f64>> for LocalPoint {
    type Error = ProjectionError;

    fn try_from(v: Vector3<f64>) -> Result<Self, Self::Error> {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<LocalPoint> for Vector3<f64> {
    fn from(p: LocalPoint) -> Self {
        p.to_vector()
    }
}

// =============================================================================
// PROJECTOR
// =============================================================================

/// Converts between an origin-anchored ENU frame and geodetic coordinates.
///
/// The origin and the derived scale factors are fixed at construction, so
/// `forward` and `reverse` are pure functions of `(origin, point)`. The
/// projector is `Copy` and can be shared across threads without locking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalCartesianProjector {
    origin: GeodeticPoint,

    /// Meters per degree of latitude at the origin (meridian radius)
    meters_per_degree_lat: f64,

    /// Meters per degree of longitude at the origin (parallel radius)
    meters_per_degree_lon: f64,

    max_radius_m: f64,

    /// Whether out-of-range points fail instead of only being logged
    strict_range: bool,
}

impl LocalCartesianProjector {
    /// Create a projector anchored at `origin`
    ///
    /// # Errors
    /// `InvalidCoordinate` if the origin sits on a pole, where east is undefined.
    pub fn new(origin: GeodeticPoint) -> Result<Self, ProjectionError> {
        if origin.latitude.abs() >= 90.0 {
            return Err(ProjectionError::invalid("latitude", origin.latitude));
        }

        let phi = origin.latitude.to_radians();
        let sin_phi = phi.sin();
        let w = 1.0 - Wgs84::E2 * sin_phi * sin_phi;

        // Prime vertical and meridian radii of curvature
        let n = Wgs84::A / w.sqrt();
        let m = Wgs84::A * (1.0 - Wgs84::E2) / (w * w.sqrt());

        let deg = std::f64::consts::PI / 180.0;

        Ok(Self {
            origin,
            meters_per_degree_lat: m * deg,
            meters_per_degree_lon: n * phi.cos() * deg,
            max_radius_m: DEFAULT_MAX_RADIUS_M,
            strict_range: false,
        })
    }

    /// Set the validity radius. `f64::INFINITY` disables range diagnostics.
    ///
    /// # Errors
    /// `InvalidCoordinate` for a NaN, zero or negative radius.
    pub fn with_max_radius(mut self, max_radius_m: f64) -> Result<Self, ProjectionError> {
        if max_radius_m.is_nan() || max_radius_m <= 0.0 {
            return Err(ProjectionError::invalid("max_radius_m", max_radius_m));
        }
        self.max_radius_m = max_radius_m;
        Ok(self)
    }

    /// Make out-of-range points fail with `OutOfRange` instead of warning.
    pub fn with_strict_range(mut self, strict: bool) -> Self {
        self.strict_range = strict;
        self
    }

    pub fn origin(&self) -> GeodeticPoint {
        self.origin
    }

    pub fn meters_per_degree_lat(&self) -> f64 {
        self.meters_per_degree_lat
    }

    pub fn meters_per_degree_lon(&self) -> f64 {
        self.meters_per_degree_lon
    }

    pub fn max_radius_m(&self) -> f64 {
        self.max_radius_m
    }

    pub fn is_strict(&self) -> bool {
        self.strict_range
    }

    /// Project a geodetic point onto the tangent plane.
    ///
    /// `forward(origin)` is exactly `(0, 0, 0)`. Altitude maps linearly onto z.
    pub fn forward(&self, geodetic: &GeodeticPoint) -> Result<LocalPoint, ProjectionError> {
        let d_lat = geodetic.latitude - self.origin.latitude;
        let d_lon = wrap_delta(geodetic.longitude - self.origin.longitude);

        let local = LocalPoint::new(
            d_lon * self.meters_per_degree_lon,
            d_lat * self.meters_per_degree_lat,
            geodetic.altitude - self.origin.altitude,
        )?;

        self.screen_range(&local)?;
        Ok(local)
    }

    /// Inverse of [`forward`](Self::forward).
    ///
    /// # Errors
    /// `InvalidCoordinate` if the northing carries the point past a pole.
    pub fn reverse(&self, local: &LocalPoint) -> Result<GeodeticPoint, ProjectionError> {
        self.screen_range(local)?;

        let latitude = self.origin.latitude + local.y / self.meters_per_degree_lat;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ProjectionError::invalid("latitude", latitude));
        }

        let longitude =
            wrap_longitude(self.origin.longitude + local.x / self.meters_per_degree_lon);

        GeodeticPoint::new(latitude, longitude, self.origin.altitude + local.z)
    }

    /// [`forward`](Self::forward) for callers holding bare numbers.
    pub fn forward_xyz(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
    ) -> Result<LocalPoint, ProjectionError> {
        self.forward(&GeodeticPoint::new(latitude, longitude, altitude)?)
    }

    /// [`reverse`](Self::reverse) for callers holding bare numbers.
    pub fn reverse_xyz(&self, x: f64, y: f64, z: f64) -> Result<GeodeticPoint, ProjectionError> {
        self.reverse(&LocalPoint::new(x, y, z)?)
    }

    /// Returns the `OutOfRange` diagnostic if `local` lies beyond the validity radius.
    pub fn check_range(&self, local: &LocalPoint) -> Option<ProjectionError> {
        let distance_m = local.horizontal_distance();
        if distance_m > self.max_radius_m {
            Some(ProjectionError::OutOfRange {
                distance_m,
                max_radius_m: self.max_radius_m,
            })
        } else {
            None
        }
    }

    fn screen_range(&self, local: &LocalPoint) -> Result<(), ProjectionError> {
        match self.check_range(local) {
            Some(err) if self.strict_range => Err(err),
            Some(err) => {
                warn!(origin = %self.origin, "{}", err);
                Ok(())
            }
            None => Ok(()),
        }
    }
}
