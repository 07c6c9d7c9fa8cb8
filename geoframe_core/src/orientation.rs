//! Quaternion to roll/pitch/yaw conversion for vehicle poses.

use nalgebra::{Quaternion, UnitQuaternion};

use crate::error::ConvertError;
use crate::telemetry::Orientation;

/// Norm below which a quaternion cannot be normalized
const MIN_QUATERNION_NORM: f64 = 1e-12;

/// Tait-Bryan angles in radians (roll about x, pitch about y, yaw about z)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Convert a logged orientation into Euler angles.
///
/// The quaternion is normalized first, so loggers that emit slightly
/// denormalized rotations are accepted.
pub fn quaternion_to_euler(q: &Orientation) -> Result<EulerAngles, ConvertError> {
    let raw = Quaternion::new(q.w, q.x, q.y, q.z);
    let norm = raw.norm();

    if !norm.is_finite() || norm < MIN_QUATERNION_NORM {
        return Err(ConvertError::InvalidOrientation { x: q.x, y: q.y, z: q.z, w: q.w });
    }

    let (roll, pitch, yaw) = UnitQuaternion::from_quaternion(raw).euler_angles();
    Ok(EulerAngles { roll, pitch, yaw })
}
