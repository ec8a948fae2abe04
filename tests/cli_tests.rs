//! Integration tests for the csef CLI
//!
//! These tests run the built binary and check exit codes and output.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn csef() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csef"))
}

/// Run csef with arguments, feeding `stdin` if given
fn run(args: &[&str], stdin: Option<&str>) -> Output {
    let mut cmd = csef();
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("Failed to execute csef");
    {
        let mut pipe = child.stdin.take().expect("stdin should be piped");
        if let Some(text) = stdin {
            pipe.write_all(text.as_bytes()).expect("should write stdin");
        }
    }
    child.wait_with_output().expect("Failed to wait for csef")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_config(dir: &Path, contents: &str) -> String {
    let path = dir.join("csef.toml");
    fs::write(&path, contents).expect("should write config");
    path.display().to_string()
}

// ============================================================================
// decode
// ============================================================================

#[test]
fn test_decode_prints_rows() {
    let output = run(&["decode", "1A1B>~", "--width", "4"], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "ABBA\n....\n");
}

#[test]
fn test_decode_from_stdin() {
    let output = run(&["decode", "-", "-w", "2"], Some("5A\n"));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "AA\nAA\nA\n");
}

#[test]
fn test_decode_lenient_reports_warnings() {
    let output = run(&["decode", "2A0", "--width", "2"], None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "AA\n");
    assert!(stderr(&output).contains("Warning: position 2"));
}

#[test]
fn test_decode_keeps_space_coded_cells() {
    let output = run(&["decode", "3A1 ", "--width", "4"], None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "AAA.\n");
    assert!(!stderr(&output).contains("Warning"), "stderr: {}", stderr(&output));
}

#[test]
fn test_decode_stdin_strips_only_line_ending() {
    let output = run(&["decode", "-", "-w", "4"], Some(" 3A1 \r\n"));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "AAA.\n");
    assert!(stderr(&output).contains("Warning: position 0"));
}

#[test]
fn test_info_counts_space_coded_cells() {
    let output = run(&["info", "3A1 ", "--width", "4", "--json"], None);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["size"], 4);
    assert_eq!(json["cells"], 4);
    assert_eq!(json["filled"], 3);
    assert_eq!(json["tokens"]["skipped"], 0);
}

#[test]
fn test_decode_strict_fails() {
    let output = run(&["decode", "1A>", "--width", "3", "--strict"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("even width"));
}

#[test]
fn test_decode_zero_width_is_invalid_args() {
    let output = run(&["decode", "1A", "--width", "0"], None);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_decode_json() {
    let output = run(&["decode", "1A1B>", "--width", "4", "--json"], None);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 1);
    assert_eq!(json["rows"][0], "ABBA");
    assert_eq!(json["warnings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_decode_snippet_uses_its_width() {
    let output = run(&["decode", "--snippet", "width: 4, encoded: '1A1B>'"], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "ABBA\n");
}

#[test]
fn test_decode_uses_configured_width() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[decode]\nwidth = 2");
    let output = run(&["decode", "4A", "--config", &config], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "AA\nAA\n");
}

#[test]
fn test_decode_configured_strict_mode() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[decode]\nstrict = true\nwidth = 2");
    let output = run(&["decode", "2A0", "--config", &config], None);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_width_flag_overrides_configured_width() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[decode]\nwidth = 2");
    let output = run(&["decode", "4A", "--width", "4", "--config", &config], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "AAAA\n");
}

#[test]
fn test_strict_flag_overrides_lenient_config() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[decode]\nstrict = false\nwidth = 2");
    let output = run(&["decode", "2A0", "--strict", "--config", &config], None);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_width_flag_beats_snippet_width() {
    let output = run(
        &["decode", "--snippet", "width: 4, encoded: '4A'", "--width", "2"],
        None,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "AA\nAA\n");
}

#[test]
fn test_mirror_uses_configured_width() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[decode]\nwidth = 4");
    let output = run(&["mirror", "2A2.", "--config", &config], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "..AA\n");
}

#[test]
fn test_encode_skip_empty_from_config() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[encode]\nskip_empty = true");
    let output = run(&["encode", "--json", "--config", &config], Some("....\n.AB.\n"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["encoded"], "1A1B");
    assert_eq!(json["offset"], serde_json::json!([1, 1]));
}

#[test]
fn test_invalid_config_is_invalid_args() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(temp.path(), "[decode]\nwidth = 0");
    let output = run(&["decode", "1A", "--config", &config], None);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("decode.width"));
}

// ============================================================================
// encode
// ============================================================================

#[test]
fn test_encode_prints_snippet() {
    let output = run(&["encode"], Some("ABBA\n....\n"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "width: 4, encoded: '1A1B>~'\n");
}

#[test]
fn test_encode_from_file_with_width() {
    let temp = TempDir::new().expect("should create temp dir");
    let grid = temp.path().join("grid.txt");
    fs::write(&grid, "AA\nB").expect("should write grid");

    let grid_arg = grid.display().to_string();
    let output = run(&["encode", &grid_arg, "--width", "3"], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "width: 3, encoded: '2A1.1B2.'\n");
}

#[test]
fn test_encode_skip_empty_json() {
    let output = run(&["encode", "--skip-empty", "--json"], Some("....\n.AB.\n....\n"));
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["encoded"], "1A1B");
    assert_eq!(json["size"], 4);
    assert_eq!(json["offset"], serde_json::json!([1, 1]));
}

#[test]
fn test_encode_comment_block() {
    let output = run(&["encode", "--comment"], Some("AB\n"));
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "// CSEF Format\n// Size: 4 characters\n// Width: 2px, Height: 1px\nwidth: 2, encoded: '1A1B'\n"
    );
}

#[test]
fn test_encode_empty_canvas_comment() {
    let output = run(&["encode", "--comment", "--skip-empty"], Some("...\n...\n"));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "// Empty canvas\n");
}

#[test]
fn test_encode_unknown_code_fails() {
    let output = run(&["encode"], Some("A~\n"));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown color code '~'"));
}

// ============================================================================
// mirror
// ============================================================================

#[test]
fn test_mirror_prints_grid() {
    let output = run(&["mirror", "2A2.1B3.", "--width", "4"], None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "..AA\n...B\n");
}

#[test]
fn test_mirror_encode() {
    let output = run(&["mirror", "2A2.", "--width", "4", "--encode"], None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "width: 4, encoded: '2.2A'\n");
}

// ============================================================================
// validate / info / palettes
// ============================================================================

#[test]
fn test_validate_valid() {
    let output = run(&["validate", "1A1B>^", "--width", "4"], None);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "valid: 4x2\n");
}

#[test]
fn test_validate_reports_problems() {
    let output = run(&["validate", "^1A1B0>", "--width", "4"], None);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("no previous row"));
    assert!(err.contains("2 problem(s) found"));
}

#[test]
fn test_validate_unknown_code_for_palette() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = write_config(
        temp.path(),
        "[codec]\nalphabet = \"AB\"\ncolors = [\"#000\", \"#FFF\"]",
    );
    let output = run(&["validate", "1A1C", "-w", "2", "--json", "--config", &config], None);
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0], "unknown color code 'C'");
}

#[test]
fn test_info_json() {
    let output = run(&["info", "~1A1B>^", "--width", "4", "--json"], None);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 3);
    assert_eq!(json["size"], 7);
    assert_eq!(json["filled"], 8);
    assert_eq!(json["tokens"]["runs"], 2);
    assert_eq!(json["tokens"]["empty_rows"], 1);
    assert_eq!(json["tokens"]["repeat_rows"], 1);
    assert_eq!(json["tokens"]["symmetry"], 1);
    assert_eq!(json["bounding_box"]["y"], 1);
}

#[test]
fn test_info_text() {
    let output = run(&["info", "9A2A", "--width", "11"], None);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Size:       11x1"));
    assert!(out.contains("2 runs"));
}

#[test]
fn test_palettes_list() {
    let output = run(&["palettes", "list"], None);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("pc66"));
    assert!(out.contains("(default)"));
}

#[test]
fn test_palettes_show() {
    let output = run(&["palettes", "show", "1bit"], None);
    assert!(output.status.success());
    assert!(stdout(&output).contains("1  B  #FFFFFF"));
}

#[test]
fn test_palettes_show_unknown() {
    let output = run(&["palettes", "show", "vga"], None);
    assert_eq!(output.status.code(), Some(1));
}
