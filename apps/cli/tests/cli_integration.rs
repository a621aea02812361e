use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

fn scratch_file(test_name: &str, contents: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("substitute_{test_name}_{nanos}.json"));
    fs::write(&path, contents).expect("write scratch file");
    path
}

fn run_cli(args: &[&str]) -> (i32, Value) {
    let out = Command::new(env!("CARGO_BIN_EXE_substitute"))
        .args(args)
        .env_remove("SUBSTITUTE_TRACKER_LOG")
        .output()
        .expect("failed to run substitute cli");
    let code = out.status.code().unwrap_or(-1);
    let stream = if code == 0 { &out.stdout } else { &out.stderr };
    let json = serde_json::from_slice(stream).unwrap_or(Value::Null);
    (code, json)
}

#[test]
fn resolve_legacy_cross_in_json_envelope() {
    let grid = scratch_file("legacy", "[[1,1,1],[1,0,1],[1,1,1]]");
    let (code, json) = run_cli(&[
        "--json",
        "resolve",
        "--grid",
        grid.to_str().expect("utf-8 path"),
        "--input",
        "3x3 block of 1s",
        "--output",
        "cross of 2s",
    ]);

    assert_eq!(code, 0);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["command"], "resolve");
    assert!(json["error"].is_null());
    assert_eq!(
        json["data"]["grid"],
        serde_json::json!([[0, 2, 0], [2, 2, 2], [0, 2, 0]])
    );
    assert_eq!(json["data"]["outcome"]["kind"], "legacy_fallback");
    let _ = fs::remove_file(grid);
}

#[test]
fn resolve_reads_grid_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_substitute"))
        .args([
            "--json",
            "resolve",
            "--grid",
            "-",
            "--input",
            "regions of 3 adjacent to 5",
            "--output",
            "recolor to 4",
            "--clear-non-matching",
        ])
        .env_remove("SUBSTITUTE_TRACKER_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(b"[[3,5,0],[0,0,0],[3,3,8]]")
        .expect("write grid");
    let out = child.wait_with_output().expect("cli finished");
    assert!(out.status.success());

    let json: Value = serde_json::from_slice(&out.stdout).expect("json envelope");
    assert_eq!(
        json["data"]["grid"],
        serde_json::json!([[4, 0, 0], [0, 0, 0], [0, 0, 0]])
    );
    assert_eq!(json["data"]["structure_type"]["type"], "valueWithAdjacency");
    assert_eq!(json["data"]["rule"]["operator"], "recolor");
}

#[test]
fn unknown_structures_reach_the_tracker_log() {
    let grid = scratch_file("unknown", "[[1,2],[3,0]]");
    let log = std::env::temp_dir().join(format!(
        "substitute_tracker_{}.jsonl",
        std::process::id()
    ));
    let _ = fs::remove_file(&log);

    let (code, json) = run_cli(&[
        "--json",
        "resolve",
        "--grid",
        grid.to_str().expect("utf-8 path"),
        "--input",
        "regions of 7",
        "--output",
        "recolor to 4",
        "--problem-id",
        "abc123",
        "--tracker-log",
        log.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(code, 0);
    assert_eq!(json["data"]["grid"], serde_json::json!([[1, 2], [3, 0]]));

    let text = fs::read_to_string(&log).expect("tracker log written");
    let first = text.lines().next().expect("one event");
    let event: Value = serde_json::from_str(first).expect("json line");
    assert_eq!(event["problem_id"], "abc123");
    assert_eq!(event["structure_type"], "connectedRegions");
    let _ = fs::remove_file(grid);
    let _ = fs::remove_file(log);
}

#[test]
fn classify_reports_type_and_operator() {
    let (code, json) = run_cli(&[
        "--json",
        "classify",
        "--input",
        "border of 4",
        "--output",
        "outline in 2",
    ]);
    assert_eq!(code, 0);
    assert_eq!(json["command"], "classify");
    assert_eq!(json["data"]["structure_type"]["type"], "boundary");
    assert_eq!(json["data"]["rule"]["operator"], "extractByBoundary");
}

#[test]
fn ragged_grid_is_an_error_envelope() {
    let grid = scratch_file("ragged", "[[1,2],[3]]");
    let (code, json) = run_cli(&[
        "--json",
        "resolve",
        "--grid",
        grid.to_str().expect("utf-8 path"),
        "--input",
        "regions of 1",
        "--output",
        "erase",
    ]);
    assert_ne!(code, 0);
    assert_eq!(json["status"], "error");
    assert!(json["data"].is_null());
    assert!(json["error"]["message"].is_string());
    let _ = fs::remove_file(grid);
}
