//! JSON exporter for converted telemetry.
//!
//! Collects converted frames for a session and writes them as a single
//! JSON document for the viewer.

use geoframe_core::converter::StreamMetadata;
use geoframe_core::{ConvertedFrame, GeodeticPoint};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A frame that could not be converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFrame {
    /// Position of the frame in the input
    pub index: usize,
    pub timestamp_ms: u64,
    pub reason: String,
}

/// Complete conversion export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionExport {
    /// Map origin all local coordinates are relative to
    pub origin: GeodeticPoint,

    /// Successfully converted frames, in input order
    pub frames: Vec<ConvertedFrame>,

    /// Stream metadata, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<StreamMetadata>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_frames: Vec<FailedFrame>,
}

impl ConversionExport {
    /// Creates a new export container.
    pub fn new(origin: GeodeticPoint) -> Self {
        Self {
            origin,
            frames: Vec::new(),
            metadata: None,
            failed_frames: Vec::new(),
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, frame: ConvertedFrame) {
        self.frames.push(frame);
    }

    /// Records a frame that failed to convert.
    pub fn add_failure(&mut self, index: usize, timestamp_ms: u64, reason: impl Into<String>) {
        self.failed_frames.push(FailedFrame {
            index,
            timestamp_ms,
            reason: reason.into(),
        });
    }

    /// Time span covered by the converted frames, in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.pose.time_ms.saturating_sub(first.pose.time_ms),
            _ => 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
