//! E2E tests for `patternkit watch`
//!
//! Pass-by-pass behavior is covered against the library in
//! `watch_local_site.rs`; these only check the process surface.

mod common;

use common::{json_lines, patternkit, sample_site};
use tempfile::tempdir;

#[test]
fn watch_json_runs_bounded_passes_then_shuts_down() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_site(root);

    let output = patternkit(root)
        .args(["watch", "--json", "--max-passes", "2", "--interval-ms", "0"])
        .current_dir(root)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let events = json_lines(&output.stdout);
    assert!(events.iter().all(|e| e["command"] == "watch"));
    assert_eq!(events.first().unwrap()["event"], "watch_started");
    assert_eq!(events.first().unwrap()["interval_ms"], 0);
    assert_eq!(events[1]["event"], "rebuild_complete");
    assert_eq!(events[1]["rendered"], 4);
    assert_eq!(events.last().unwrap()["event"], "shutdown");
    assert_eq!(events.len(), 3);

    assert!(root.join("public/patterns/navigation.json").exists());
}

#[test]
fn watch_text_output_is_line_oriented() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    sample_site(root);

    let output = patternkit(root)
        .args(["watch", "--max-passes", "1"])
        .current_dir(root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert!(lines[0].starts_with("Watching "), "{stdout}");
    assert!(lines[0].contains("every 10ms"), "{stdout}");
    assert_eq!(lines[1], "Rebuilt: 4 patterns rendered");
    assert_eq!(lines.last().copied(), Some("Stopped watching"));
}

#[test]
fn watch_reports_missing_patterns_directory_and_keeps_running() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    common::write(root, "patternkit.toml", "");

    let output = patternkit(root)
        .args(["watch", "--json", "--max-passes", "2", "--interval-ms", "0"])
        .current_dir(root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let events = json_lines(&output.stdout);
    let errors = events.iter().filter(|e| e["event"] == "error").count();
    assert_eq!(errors, 3);
    assert_eq!(events.last().unwrap()["event"], "shutdown");
}
