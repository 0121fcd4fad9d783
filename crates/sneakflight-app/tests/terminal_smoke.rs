use std::fs;
use std::process::Command;

fn headless_command() -> Command {
    let bin = env!("CARGO_BIN_EXE_sneakflight");
    let mut cmd = Command::new(bin);
    cmd.env("SNEAKFLIGHT_TERMINAL_HEADLESS", "1")
        .env("SNEAKFLIGHT_SEED", "7")
        .env("TERM", "xterm-256color")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn terminal_headless_smoke() {
    let status = headless_command()
        .status()
        .expect("failed to run sneakflight binary");
    assert!(status.success(), "terminal headless run failed");
}

#[test]
fn terminal_headless_writes_report() {
    let dir = std::env::temp_dir().join(format!("sneakflight-smoke-{}", std::process::id()));
    let path = dir.join("report.json");

    let status = headless_command()
        .env("SNEAKFLIGHT_TERMINAL_HEADLESS_FRAMES", "40")
        .env("SNEAKFLIGHT_TERMINAL_HEADLESS_REPORT", &path)
        .env("SNEAKFLIGHT_MAP", "vienna-hotel")
        .status()
        .expect("failed to run sneakflight binary");
    assert!(status.success(), "terminal headless run failed");

    let raw = fs::read_to_string(&path).expect("report written");
    let report: serde_json::Value = serde_json::from_str(&raw).expect("report is json");
    assert_eq!(report["summary"]["frame_count"], 40);
    assert_eq!(report["initial"]["session"], "Playing");
    assert_eq!(report["frames"].as_array().map(Vec::len), Some(40));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_map_is_rejected() {
    let output = headless_command()
        .args(["--map", "mars"])
        .output()
        .expect("failed to run sneakflight binary");
    assert!(!output.status.success());
}
