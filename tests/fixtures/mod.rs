//! Shared test fixtures for conversion and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Portrait layout with one two-button group and no extended edges.
pub const PORTRAIT_BUTTONS: &str = r#""portrait": {
    "mappingSize": { "width": 430, "height": 932 },
    "assets": { "resizable": "portrait.png" },
    "screens": [ { "outputFrame": { "x": 0, "y": 80, "width": 430, "height": 287 } } ],
    "items": [
        { "inputs": ["a", "b"], "frame": { "x": 320, "y": 600, "width": 80, "height": 80 } }
    ]
}"#;

/// Landscape layout with a d-pad, a thumbstick and an unknown input.
pub const LANDSCAPE_CONTROLS: &str = r#""landscape": {
    "mappingSize": { "width": 932, "height": 430 },
    "assets": { "large": "landscape.png" },
    "gameScreenFrame": { "x": 200, "y": 0, "width": 532, "height": 430 },
    "extendedEdges": { "top": 5, "bottom": 5, "left": 5, "right": 5 },
    "items": [
        { "inputs": { "up": "up", "down": "down", "left": "left", "right": "right" },
          "frame": { "x": 20, "y": 200, "width": 120, "height": 120 } },
        { "inputs": { "up": "analogStickUp", "down": "analogStickDown",
                      "left": "analogStickLeft", "right": "analogStickRight" },
          "thumbstick": { "name": "stick.png", "width": 60, "height": 60 },
          "frame": { "x": 780, "y": 250, "width": 120, "height": 120 } },
        { "inputs": ["start", "turbo"], "frame": { "x": 800, "y": 20, "width": 60, "height": 30 } }
    ]
}"#;

/// Writes `info.json` for a skin with the given orientation entries, plus
/// every image the fixture layouts reference.
pub fn write_skin(dir: &Path, game: &str, orientations: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    let info = format!(
        r#"{{
            "name": "Fixture Skin",
            "identifier": "com.example.fixture",
            "gameTypeIdentifier": "com.rileytestut.delta.game.{game}",
            "representations": {{ "iphone": {{ "edgeToEdge": {{ {} }} }} }}
        }}"#,
        orientations.join(", ")
    );
    fs::write(dir.join("info.json"), info).unwrap();
    for image in ["portrait.png", "landscape.png", "stick.png"] {
        fs::write(dir.join(image), image.as_bytes()).unwrap();
    }
}

/// Parses `key = value` lines, stripping quotes from string values.
pub fn parse_cfg(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once(" = "))
        .map(|(key, value)| (key.to_string(), value.trim_matches('"').to_string()))
        .collect()
}

/// Splits a descriptor string into command and numeric fields.
pub fn parse_desc(desc: &str) -> (String, [f64; 4], String) {
    let parts: Vec<&str> = desc.split(',').collect();
    assert_eq!(parts.len(), 6, "malformed descriptor {desc}");
    let num = |i: usize| parts[i].parse::<f64>().unwrap();
    (
        parts[0].to_string(),
        [num(1), num(2), num(4), num(5)],
        parts[3].to_string(),
    )
}

/// Path to the retroskin binary
pub fn retroskin_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_retroskin"))
}

/// Creates a Command with an isolated (empty) config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(retroskin_bin());
    cmd.env("RETROSKIN_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}
