//! CLI integration tests
//!
//! These tests run the iconsheet binary inside temporary project directories
//! and check exit codes, printed tallies and the files left behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the iconsheet binary
fn iconsheet_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_iconsheet"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(iconsheet_binary())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute iconsheet")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// 12x10 sheet with 4px cells at (0, 0); pixel (x, y) = y*12 + x.
fn write_project(dir: &Path) {
    let bytes: Vec<String> = (0..120u16)
        .flat_map(|v| v.to_le_bytes())
        .map(|b| format!("0x{:02x}", b))
        .collect();
    fs::write(dir.join("sheet.c"), format!("const uint8_t sheet[] = {{\n{}\n}};\n", bytes.join(", ")))
        .unwrap();

    fs::write(
        dir.join("iconsheet.toml"),
        r#"
[project]
name = "cli-test"
out = "icons"

[sheet]
source = "sheet.c"
width = 12
height = 10
cell_size = 4
origin_x = 0
origin_y = 0

[output]
size = 2

[cells]
sunny = [0, 0]
rainy = [1, 2]

[icons]
fog = "sunny"
"#,
    )
    .unwrap();
}

#[test]
fn test_extract_writes_every_icon() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = run(temp.path(), &["extract"]);

    assert!(output.status.success(), "extract failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Extracted 3/3 icons"));
    for stem in ["sunny_icon_2", "rainy_icon_2", "fog_icon_2"] {
        for ext in ["c", "h", "bmp"] {
            let path = temp.path().join("icons").join(format!("{}.{}", stem, ext));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
    let bmp = fs::read(temp.path().join("icons/sunny_icon_2.bmp")).unwrap();
    assert_eq!(bmp.len(), 54 + 2 * (6 + 2));
}

#[test]
fn test_extract_overrides() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output =
        run(temp.path(), &["extract", "--icon", "rainy", "--size", "4", "--no-bmp", "--out", "dist"]);

    assert!(output.status.success(), "extract failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Extracted 1/1 icons"));
    assert!(temp.path().join("dist/rainy_icon_4.c").is_file());
    assert!(!temp.path().join("dist/rainy_icon_4.bmp").exists());
    assert!(!temp.path().join("dist/sunny_icon_4.c").exists());

    let source = fs::read_to_string(temp.path().join("dist/rainy_icon_4.c")).unwrap();
    assert!(source.contains(".header.w = 4,"));
    assert!(source.contains(".data_size = 32,"));
}

#[test]
fn test_extract_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = run(temp.path(), &["extract", "--dry-run"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Dry run - would write:"));
    assert!(text.contains("fog_icon_2.bmp"));
    assert!(!temp.path().join("icons").exists());
}

#[test]
fn test_extract_unknown_icon_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = run(temp.path(), &["extract", "--icon", "tornado"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown icon 'tornado'"));
    assert!(stderr(&output).contains("Available icons: rainy, sunny, fog"));
}

#[test]
fn test_extract_missing_sheet_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::remove_file(temp.path().join("sheet.c")).unwrap();

    let output = run(temp.path(), &["extract"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot read sprite sheet"));
}

#[test]
fn test_extract_item_failure_exits_1() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    fs::create_dir_all(temp.path().join("icons/rainy_icon_2.h")).unwrap();

    let output = run(temp.path(), &["extract"]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Extracted 2/3 icons"));
    assert!(text.contains("  - rainy: failed:"));
}

#[test]
fn test_extract_json_summary() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = run(temp.path(), &["extract", "--json", "--no-bmp"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["succeeded"], 3);
    assert_eq!(value["items"][0]["name"], "rainy");
    assert_eq!(value["items"][0]["outputs"].as_array().unwrap().len(), 2);

    for line in stderr(&output).lines() {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(event["event"].is_string());
    }
}

#[test]
fn test_invalid_config_exits_1() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("iconsheet.toml"), "[output]\nsize = 0\n").unwrap();

    let output = run(temp.path(), &["extract"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("output.size"));
}

#[test]
fn test_preview_converts_emitted_sources() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    let extract = run(temp.path(), &["extract", "--no-bmp"]);
    assert!(extract.status.success());
    fs::write(temp.path().join("icons/odd_icon_2.c"), "{0x00, 0x00, 0x00, 0x00, 0x00, 0x00}")
        .unwrap();

    let output = run(temp.path(), &["preview", "icons"]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Converted 3/4"), "{}", text);
    assert!(text.contains("odd_icon_2.c"));
    assert!(temp.path().join("icons/sunny_icon_2.bmp").is_file());
    assert!(!temp.path().join("icons/odd_icon_2.bmp").exists());
}

#[test]
fn test_preview_defaults_to_project_out() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());
    assert!(run(temp.path(), &["extract", "--no-bmp"]).status.success());

    let output = run(temp.path(), &["preview"]);

    assert!(output.status.success(), "preview failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Converted 3/3"));
}

#[test]
fn test_catalog_lists_default_weather_icons() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), &["catalog"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 15);
    assert!(text.contains("alias of partlycloudy"));
}

#[test]
fn test_catalog_json_uses_project_config() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    let output = run(temp.path(), &["catalog", "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    let icons = value["icons"].as_array().unwrap();
    assert_eq!(icons.len(), 3);
    assert_eq!(icons[0]["name"], "rainy");
    assert_eq!(icons[0]["x"], 8);
    assert_eq!(icons[0]["y"], 4);
    assert_eq!(icons[2]["alias"], true);
}

#[test]
fn test_rasterize_missing_tool() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("svg")).unwrap();

    let output =
        run(temp.path(), &["rasterize", "--input", "svg", "--tool", "no-such-rasterizer-xyz"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no-such-rasterizer-xyz"));
}

#[test]
fn test_missing_explicit_config_is_invalid_args() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), &["catalog", "--config", "nope.toml"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Config file not found"));
}
