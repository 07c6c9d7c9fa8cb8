//! Telemetry frame types consumed by the pose converter.
//!
//! Mirrors the JSON emitted by the vehicle logger: every frame carries the
//! key pose topic and, optionally, the planner's path messages.

use serde::{Deserialize, Serialize};

/// Position in the vehicle's local frame (meters)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Orientation quaternion as logged (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Orientation {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    #[serde(default)]
    pub orientation: Orientation,
}

/// The key topic of a frame; drives frame timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseMessage {
    /// Unix milliseconds
    pub timestamp_ms: u64,
    pub pose: Pose,
}

/// One planner output: the poses of the intended path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMessage {
    pub timestamp_ms: u64,
    pub poses: Vec<Pose>,
}

/// A single telemetry frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub key_topic: PoseMessage,

    #[serde(default, alias = "/planner/path", skip_serializing_if = "Vec::is_empty")]
    pub planner_path: Vec<PathMessage>,
}

impl TelemetryFrame {
    /// Creates a frame with no planner output.
    pub fn new(timestamp_ms: u64, pose: Pose) -> Self {
        Self {
            key_topic: PoseMessage { timestamp_ms, pose },
            planner_path: Vec::new(),
        }
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.key_topic.timestamp_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_logger_json() {
        let json = r#"{
            "key_topic": {
                "timestamp_ms": 1546300800000,
                "pose": {
                    "position": {"x": 1.5, "y": -2.0, "z": 0.3},
                    "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
                }
            },
            "/planner/path": [
                {"timestamp_ms": 1546300800010, "poses": [
                    {"position": {"x": 1.0, "y": 2.0}},
                    {"position": {"x": 3.0, "y": 4.0, "z": 0.5}}
                ]}
            ]
        }"#;

        let frame: TelemetryFrame = serde_json::from_str(json).unwrap();

        assert_eq!(frame.timestamp_ms(), 1546300800000);
        assert_eq!(frame.key_topic.pose.position.y, -2.0);
        assert_eq!(frame.planner_path.len(), 1);
        assert_eq!(frame.planner_path[0].poses[0].position.z, 0.0);
        assert_eq!(frame.planner_path[0].poses[0].orientation, Orientation::default());
    }

    #[test]
    fn test_planner_path_optional() {
        let json = r#"{"key_topic": {"timestamp_ms": 5, "pose": {"position": {"x": 0.0, "y": 0.0}}}}"#;
        let frame: TelemetryFrame = serde_json::from_str(json).unwrap();

        assert!(frame.planner_path.is_empty());
        assert_eq!(frame, TelemetryFrame::new(5, Pose::default()));
    }
}
