use std::io::Write;
use std::process::Command;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;

const FRAMES: &str = r#"[
    {
        "key_topic": {
            "timestamp_ms": 1000,
            "pose": {
                "position": {"x": 100.0, "y": 0.0, "z": 1.2},
                "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
            }
        },
        "/planner/path": [
            {"timestamp_ms": 1005, "poses": [
                {"position": {"x": 100.0, "y": 0.0}},
                {"position": {"x": 110.0, "y": 2.0}}
            ]}
        ]
    },
    {
        "key_topic": {
            "timestamp_ms": 1100,
            "pose": {"position": {"x": 101.0, "y": 0.5}}
        }
    }
]"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn geoframe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_geoframe"))
}

#[test]
fn converts_frames_to_export_file() {
    let input = write_temp(FRAMES);
    let output = NamedTempFile::new().unwrap();

    let status = geoframe()
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .args(["--origin-lat", "49.0", "--origin-lon", "8.4", "--origin-alt", "100"])
        .arg("--metadata")
        .status()
        .unwrap();
    assert!(status.success());

    let text = std::fs::read_to_string(output.path()).unwrap();
    let export: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(export["origin"]["latitude"], 49.0);
    assert_eq!(export["frames"].as_array().unwrap().len(), 2);
    assert_eq!(export["metadata"].as_array().unwrap().len(), 2);

    let pose = &export["frames"][0]["pose"];
    assert_eq!(pose["stream"], "vehicle-pose");
    assert_eq!(pose["z"], 0.0);
    assert_relative_eq!(pose["geodetic"]["latitude"].as_f64().unwrap(), 49.0, epsilon = 1e-12);
    let shift = pose["geodetic"]["longitude"].as_f64().unwrap() - 8.4;
    assert!(shift > 0.00136 && shift < 0.00137);

    let trajectory = &export["frames"][0]["trajectories"][0];
    assert_eq!(trajectory["id"], "vehicle-path");
    assert_eq!(trajectory["polyline"].as_array().unwrap().len(), 2);
    assert!(export["frames"][1].get("trajectories").is_none());
}

#[test]
fn strict_mode_fails_far_frames() {
    let input = write_temp(FRAMES);
    let output = NamedTempFile::new().unwrap();

    let result = geoframe()
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .args(["--max-radius", "50", "--strict", "--json"])
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));

    let summary: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["converted"], 0);
    assert_eq!(summary["failed"], 2);
}

#[test]
fn config_file_sets_origin() {
    let input = write_temp(FRAMES);
    let config = write_temp(
        r#"{"origin": {"latitude": -33.8688, "longitude": 151.2093, "altitude": 5.0}}"#,
    );

    let result = geoframe()
        .arg("--input")
        .arg(input.path())
        .arg("--config")
        .arg(config.path())
        .output()
        .unwrap();
    assert!(result.status.success());

    let export: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(export["origin"]["longitude"], 151.2093);
    assert!(export.get("metadata").is_none());
}

#[test]
fn rejects_invalid_origin() {
    let input = write_temp(FRAMES);

    let status = geoframe()
        .arg("--input")
        .arg(input.path())
        .args(["--origin-lat", "95.0"])
        .status()
        .unwrap();

    assert!(!status.success());
}
