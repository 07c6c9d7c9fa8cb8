//! Procedural lane geometry for layer testing.
//!
//! Generates small closed circles and logarithmic spirals around a
//! geodetic anchor. Offsets are applied directly in degrees, so shapes are
//! slightly elliptical away from the equator; that is fine for exercising
//! renderers, not for measuring anything.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::LaneError;
use crate::projection::{GeodeticPoint, LocalCartesianProjector, LocalPoint};

/// Degrees of lon/lat per unit of shape radius
pub const DEGREE_SCALE: f64 = 0.0001;

/// Spiral radius at theta = 0
const SPIRAL_A: f64 = 0.7;

/// Spiral growth rate per radian
const SPIRAL_B: f64 = 0.3;

/// A lane path as `[lon, lat, alt]` vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneGeometry {
    pub vertices: Vec<[f64; 3]>,
}

impl LaneGeometry {
    /// Unit circle scaled by [`DEGREE_SCALE`], closed by repeating the first vertex.
    pub fn circle(anchor: &GeodeticPoint, segments: usize) -> Result<Self, LaneError> {
        if segments == 0 {
            return Err(LaneError::NoSegments);
        }

        let arc = 2.0 * PI / segments as f64;
        let mut offsets: Vec<(f64, f64)> = (0..segments)
            .map(|i| {
                let angle = arc * i as f64;
                (DEGREE_SCALE * angle.cos(), DEGREE_SCALE * angle.sin())
            })
            .collect();
        offsets.push(offsets[0]);

        Ok(Self::from_offsets(anchor, &offsets))
    }

    /// Logarithmic spiral `r = a * e^(b * theta)` over one and a half turns.
    pub fn spiral(anchor: &GeodeticPoint, segments: usize) -> Result<Self, LaneError> {
        if segments == 0 {
            return Err(LaneError::NoSegments);
        }

        let arc = 3.0 * PI / segments as f64;
        let offsets: Vec<(f64, f64)> = (0..segments)
            .map(|i| {
                let theta = arc * i as f64;
                let r = SPIRAL_A * (SPIRAL_B * theta).exp();
                (DEGREE_SCALE * r * theta.cos(), DEGREE_SCALE * r * theta.sin())
            })
            .collect();

        Ok(Self::from_offsets(anchor, &offsets))
    }

    fn from_offsets(anchor: &GeodeticPoint, offsets: &[(f64, f64)]) -> Self {
        let vertices = offsets
            .iter()
            .map(|(d_lon, d_lat)| {
                [anchor.longitude() + d_lon, anchor.latitude() + d_lat, anchor.altitude()]
            })
            .collect();
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Packed `lon, lat, alt, lon, lat, alt, ...` buffer for binary attributes.
    pub fn flatten(&self) -> Vec<f64> {
        self.vertices.iter().flatten().copied().collect()
    }

    /// Project every vertex into the projector's local frame.
    pub fn to_local(&self, projector: &LocalCartesianProjector) -> Result<Vec<LocalPoint>, LaneError> {
        self.vertices
            .iter()
            .map(|[lon, lat, alt]| {
                projector
                    .forward_xyz(*lat, *lon, *alt)
                    .map_err(LaneError::from)
            })
            .collect()
    }
}
