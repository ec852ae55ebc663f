use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use voicing_classifier::audio::write_wav_mono;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voicing_cli"))
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("voicing_cli_{}_{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Half a second of silence followed by half a second of a 150 Hz tone
fn write_fixture(dir: &std::path::Path) -> PathBuf {
    let mut samples = vec![0.0f32; 8000];
    samples.extend((0..8000).map(|i| {
        0.5 * (2.0 * std::f32::consts::PI * 150.0 * i as f32 / 16000.0).sin()
    }));
    let path = dir.join("input.wav");
    write_wav_mono(&path, &samples, 16000).expect("write fixture wav");
    path
}

#[test]
fn analyze_prints_report() {
    let dir = scratch_dir("report");
    let input = write_fixture(&dir);

    let output = cli()
        .args(["analyze", "--input"])
        .arg(&input)
        .output()
        .expect("failed to run voicing_cli analyze");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("analysis report JSON payload");
    assert_eq!(json["sample_rate"], 16000);
    assert_eq!(json["frame_count"], 99);
    assert_eq!(json["frames"][0]["label"], 0);
    assert_eq!(json["frames"][90]["label"], 2);
    assert!(json["summary"]["voiced_frames"].as_u64().unwrap_or_default() > 30);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn analyze_exports_segments() {
    let dir = scratch_dir("export");
    let input = write_fixture(&dir);
    let out_dir = dir.join("out");

    let output = cli()
        .args(["analyze", "--export-segments", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&out_dir)
        .output()
        .expect("failed to run voicing_cli analyze --export-segments");
    assert!(output.status.success());

    assert!(out_dir.join("report.json").is_file());
    for name in ["silent.wav", "unvoiced.wav", "voiced.wav"] {
        assert!(out_dir.join(name).is_file(), "missing {name}");
    }
    let frame_files = std::fs::read_dir(out_dir.join("frames"))
        .expect("frames dir")
        .count();
    assert!(frame_files >= 1 && frame_files <= 5);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn frame_prints_diagnostic() {
    let dir = scratch_dir("frame");
    let input = write_fixture(&dir);

    let output = cli()
        .args(["frame", "--index", "80", "--input"])
        .arg(&input)
        .output()
        .expect("failed to run voicing_cli frame");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("frame diagnostic JSON");
    assert_eq!(json["index"], 80);
    assert_eq!(json["label"], 2);
    assert_eq!(json["features"]["is_voiced_pitch"], true);
    assert_eq!(
        json["features"]["autocorrelation"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default(),
        400
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn frame_out_of_range_fails() {
    let dir = scratch_dir("range");
    let input = write_fixture(&dir);

    let output = cli()
        .args(["frame", "--index", "500", "--input"])
        .arg(&input)
        .output()
        .expect("failed to run voicing_cli frame");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(stderr.contains("out of range"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("code=3005"), "missing logged error code: {stderr}");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_input_fails() {
    let output = cli()
        .args(["analyze", "--input", "/nonexistent/voicing_input.wav"])
        .output()
        .expect("failed to run voicing_cli analyze");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(stderr.contains("code=4001"), "missing logged error code: {stderr}");
}

#[test]
fn defaults_prints_config() {
    let output = cli()
        .arg("defaults")
        .output()
        .expect("failed to run voicing_cli defaults");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("config JSON");
    assert_eq!(json["framing"]["frame_length_ms"], 25.0);
    assert_eq!(json["thresholds"]["zcr_threshold"].as_f64().map(|v| (v - 0.1).abs() < 1e-6), Some(true));
}
