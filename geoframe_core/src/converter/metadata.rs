//! Stream metadata declared by the pose converter.
//!
//! Viewers use this block to validate incoming streams and to pick default
//! styling; it is static for a given converter.

use serde::{Deserialize, Serialize};

use super::{VEHICLE_POSE, VEHICLE_TRAJECTORY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamCategory {
    /// The frame's pose stream
    #[serde(rename = "vehicle-pose")]
    VehiclePose,
    /// Geometry primitives (polylines, points, ...)
    Primitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateKind {
    /// Positions are relative to the map origin
    MapRelative,
    /// Positions are relative to the vehicle pose
    VehicleRelative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Polyline,
}

/// Default style applied to every object on a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleClass {
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_width_min_pixels: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub stream: String,
    pub category: StreamCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<CoordinateKind>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub primitive_type: Option<PrimitiveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_default: Option<StyleClass>,
}

impl StreamMetadata {
    pub fn new(stream: &str, category: StreamCategory) -> Self {
        Self {
            stream: stream.to_string(),
            category,
            coordinate: None,
            primitive_type: None,
            style_default: None,
        }
    }

    pub fn coordinate(mut self, coordinate: CoordinateKind) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn primitive(mut self, primitive_type: PrimitiveType) -> Self {
        self.primitive_type = Some(primitive_type);
        self
    }

    pub fn style_default(mut self, style: StyleClass) -> Self {
        self.style_default = Some(style);
        self
    }
}

/// Metadata for the pose and trajectory streams.
pub fn stream_metadata() -> Vec<StreamMetadata> {
    vec![
        StreamMetadata::new(VEHICLE_POSE, StreamCategory::VehiclePose),
        StreamMetadata::new(VEHICLE_TRAJECTORY, StreamCategory::Primitive)
            .coordinate(CoordinateKind::MapRelative)
            .primitive(PrimitiveType::Polyline)
            .style_default(StyleClass {
                stroke_color: "#57AD57AA".to_string(),
                stroke_width: 1.4,
                stroke_width_min_pixels: 1.0,
            }),
    ]
}
