//! Shared helpers for PatternKit integration tests.
//!
//! - `patternkit()`: the CLI binary with an isolated environment
//! - `sample_site()`: a small project on disk

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

/// The CLI with user config, env overrides and log filters isolated to `home`
pub fn patternkit(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_patternkit"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("PATTERNKIT_SOURCE")
        .env_remove("PATTERNKIT_PUBLIC")
        .env_remove("PATTERNKIT_INTERVAL_MS")
        .env_remove("PATTERNKIT_LOG");
    cmd
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Two buckets, one pseudo-pattern, global data and a watched stylesheet
pub fn sample_site(root: &Path) {
    write(
        root,
        "patternkit.toml",
        r#"[watch]
interval_ms = 10

[[watch.files]]
source = "css/style.css"
"#,
    );
    write(root, "source/data/data.json", r#"{"title": "Demo"}"#);
    write(root, "source/css/style.css", "body {}");
    write(root, "source/_patterns/00-atoms/00-global/00-colors.mustache", "<ul class=\"colors\"></ul>");
    write(root, "source/_patterns/00-atoms/00-global/00-colors~dark.json", r#"{"theme": "dark"}"#);
    write(root, "source/_patterns/00-atoms/00-global/01-fonts.mustache", "<p>fonts</p>");
    write(
        root,
        "source/_patterns/01-molecules/00-media/00-media-object.mustache",
        "<div>{{> atoms-colors }}</div>",
    );
}

/// Parse NDJSON output into values
pub fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
