//! Pose Converter - telemetry frames to visualization streams
//!
//! Every frame produces exactly one vehicle pose. The pose is the reference
//! point for all other data in the frame and drives playback timing, so a
//! frame that cannot produce a pose fails as a whole.
//!
//! Planner output, when present, becomes polyline primitives on the
//! trajectory stream. Those stay in map-relative local meters; only the
//! pose is additionally reported in latitude/longitude.

pub mod metadata;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConvertError;
use crate::orientation::quaternion_to_euler;
use crate::projection::{GeodeticPoint, LocalCartesianProjector, LocalPoint};
use crate::telemetry::{PathMessage, Position, TelemetryFrame};

pub use metadata::{stream_metadata, StreamMetadata};

/// Stream carrying the vehicle pose
pub const VEHICLE_POSE: &str = "vehicle-pose";

/// Stream carrying planned trajectory polylines
pub const VEHICLE_TRAJECTORY: &str = "/vehicle/trajectory";

/// Object id of the planned path primitive
pub const TRAJECTORY_ID: &str = "vehicle-path";

/// Vehicle pose for one frame.
///
/// `map_origin` anchors the local `x`/`y` offsets; `geodetic` is the same
/// position already resolved to WGS84.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    pub stream: String,
    pub time_ms: u64,
    pub map_origin: GeodeticPoint,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub x: f64,
    pub y: f64,
    /// Always 0: the vehicle is pinned to the ground plane
    pub z: f64,
    pub geodetic: GeodeticPoint,
}

/// A planned path as a polyline of local positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPrimitive {
    pub stream: String,
    pub timestamp_ms: u64,
    pub id: String,
    pub polyline: Vec<[f64; 3]>,
}

/// Output of converting one telemetry frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedFrame {
    pub pose: VehiclePose,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectories: Vec<TrajectoryPrimitive>,
}

/// Converts telemetry frames relative to a fixed map origin.
#[derive(Debug, Clone, Copy)]
pub struct PoseConverter {
    projector: LocalCartesianProjector,
}

impl PoseConverter {
    pub fn new(projector: LocalCartesianProjector) -> Self {
        Self { projector }
    }

    pub fn projector(&self) -> &LocalCartesianProjector {
        &self.projector
    }

    pub fn origin(&self) -> GeodeticPoint {
        self.projector.origin()
    }

    /// Convert a single frame into its pose and trajectory primitives
    pub fn convert_frame(&self, frame: &TelemetryFrame) -> Result<ConvertedFrame, ConvertError> {
        let pose = self.build_pose(frame)?;
        let trajectories = frame
            .planner_path
            .iter()
            .map(|path| self.build_trajectory(path))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "frame t={} | pose {} | {:.1}m from origin | {} trajectories",
            pose.time_ms,
            pose.geodetic,
            self.origin().haversine_distance(&pose.geodetic),
            trajectories.len()
        );

        Ok(ConvertedFrame { pose, trajectories })
    }

    /// Resolve a local position to latitude/longitude/altitude
    pub fn pose_to_geodetic(&self, position: &Position) -> Result<GeodeticPoint, ConvertError> {
        let local = LocalPoint::new(position.x, position.y, position.z)?;
        Ok(self.projector.reverse(&local)?)
    }

    /// Stream metadata for everything this converter emits
    pub fn metadata(&self) -> Vec<StreamMetadata> {
        stream_metadata()
    }

    fn build_pose(&self, frame: &TelemetryFrame) -> Result<VehiclePose, ConvertError> {
        let message = &frame.key_topic;
        let rotation = quaternion_to_euler(&message.pose.orientation)?;

        let ground = Position { z: 0.0, ..message.pose.position };
        let geodetic = self.pose_to_geodetic(&ground)?;

        Ok(VehiclePose {
            stream: VEHICLE_POSE.to_string(),
            time_ms: message.timestamp_ms,
            map_origin: self.origin(),
            roll: rotation.roll,
            pitch: rotation.pitch,
            yaw: rotation.yaw,
            x: ground.x,
            y: ground.y,
            z: ground.z,
            geodetic,
        })
    }

    fn build_trajectory(&self, path: &PathMessage) -> Result<TrajectoryPrimitive, ConvertError> {
        let polyline = path
            .poses
            .iter()
            .map(|p| {
                let Position { x, y, z } = p.position;
                LocalPoint::new(x, y, z).map(|local| local.to_array())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TrajectoryPrimitive {
            stream: VEHICLE_TRAJECTORY.to_string(),
            timestamp_ms: path.timestamp_ms,
            id: TRAJECTORY_ID.to_string(),
            polyline,
        })
    }
}
