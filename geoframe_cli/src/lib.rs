//! GeoFrame conversion harness
//!
//! Drives a [`PoseConverter`] over a batch of telemetry frames and collects
//! the results into a [`ConversionExport`]. Frames that fail are logged and
//! recorded instead of aborting the batch.

mod exporter;

pub use exporter::{ConversionExport, FailedFrame};

use std::path::Path;

use anyhow::Context;
use geoframe_core::{PoseConverter, TelemetryFrame};
use tracing::{debug, warn};

/// Read a JSON array of telemetry frames.
pub fn load_frames(path: impl AsRef<Path>) -> anyhow::Result<Vec<TelemetryFrame>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading telemetry from {}", path.display()))?;
    let frames: Vec<TelemetryFrame> = serde_json::from_str(&text)
        .with_context(|| format!("parsing telemetry in {}", path.display()))?;
    Ok(frames)
}

/// Convert every frame, skipping (and recording) the ones that fail.
pub fn convert_all(
    converter: &PoseConverter,
    frames: &[TelemetryFrame],
    with_metadata: bool,
) -> ConversionExport {
    let mut export = ConversionExport::new(converter.origin());

    for (index, frame) in frames.iter().enumerate() {
        match converter.convert_frame(frame) {
            Ok(converted) => export.add_frame(converted),
            Err(e) => {
                warn!("frame {} (t={}) skipped: {}", index, frame.timestamp_ms(), e);
                export.add_failure(index, frame.timestamp_ms(), e.to_string());
            }
        }
    }

    if with_metadata {
        export.metadata = Some(converter.metadata());
    }

    debug!(
        "converted {}/{} frames spanning {}ms",
        export.frames.len(),
        frames.len(),
        export.duration_ms()
    );

    export
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoframe_core::telemetry::{Orientation, Pose, Position};
    use geoframe_core::ConverterConfig;

    fn frame(timestamp_ms: u64, x: f64, y: f64) -> TelemetryFrame {
        TelemetryFrame::new(
            timestamp_ms,
            Pose {
                position: Position { x, y, z: 0.0 },
                orientation: Orientation::default(),
            },
        )
    }

    #[test]
    fn test_convert_all_records_failures() {
        let converter = PoseConverter::new(ConverterConfig::default().projector().unwrap());

        let mut bad = frame(200, 0.0, 0.0);
        bad.key_topic.pose.orientation = Orientation { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

        let frames = vec![frame(100, 1.0, 2.0), bad, frame(300, 3.0, 4.0)];
        let export = convert_all(&converter, &frames, false);

        assert_eq!(export.frames.len(), 2);
        assert_eq!(export.failed_frames.len(), 1);
        assert_eq!(export.failed_frames[0].index, 1);
        assert_eq!(export.failed_frames[0].timestamp_ms, 200);
        assert_eq!(export.duration_ms(), 200);
        assert!(export.metadata.is_none());
    }

    #[test]
    fn test_metadata_included_on_request() {
        let converter = PoseConverter::new(ConverterConfig::default().projector().unwrap());
        let export = convert_all(&converter, &[frame(0, 0.0, 0.0)], true);

        let metadata = export.metadata.as_ref().unwrap();
        assert_eq!(metadata.len(), 2);

        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(json["metadata"][1]["stream"], "/vehicle/trajectory");
        assert!(json.get("failed_frames").is_none());
    }

    #[test]
    fn test_empty_export() {
        let converter = PoseConverter::new(ConverterConfig::default().projector().unwrap());
        let export = convert_all(&converter, &[], false);

        assert!(export.frames.is_empty());
        assert_eq!(export.duration_ms(), 0);
    }
}
