//! Error handling integration tests

use std::process::Command;

fn winclip_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_winclip"))
}

fn isolated(dir: &tempfile::TempDir, args: &[&str]) -> std::process::Output {
    winclip_bin()
        .args(args)
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env("APPDATA", dir.path())
        .output()
        .expect("Failed to execute command")
}

#[test]
fn invalid_subcommand() {
    let output = winclip_bin()
        .arg("paste")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand") || stderr.contains("error"));
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["config", "get", "api_key"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown key"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["config", "set", "format", "html"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open_attempts"), "got: {}", stderr);
}

#[test]
fn config_set_zero_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["config", "set", "open_attempts", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 1"), "got: {}", stderr);
}

#[test]
fn config_set_invalid_format() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["config", "set", "default_format", "bitmap"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid text format"),
        "Expected error about invalid format, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["config", "set", "append", "maybe"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["config", "list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not set"), "got: {}", stdout);
}

#[cfg(not(windows))]
#[test]
fn clipboard_commands_fail_without_native_clipboard() {
    let dir = tempfile::tempdir().unwrap();
    for args in [&["get"][..], &["clear"], &["formats"], &["set", "text"]] {
        let output = isolated(&dir, args);

        assert_eq!(output.status.code(), Some(1), "winclip {:?}", args);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("not supported"), "got: {}", stderr);
    }
}

#[test]
fn set_without_value_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["set", "--format", "html"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn set_file_list_without_paths_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir, &["set", "--format", "file-list"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("value to set is required"), "got: {}", stderr);
}

#[test]
fn as_unicode_with_non_csv_format_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    for args in [&["get", "-f", "html", "--as-unicode"][..], &["set", "-f", "rtf", "--as-unicode", "x"]] {
        let output = isolated(&dir, args);

        assert_eq!(output.status.code(), Some(2), "winclip {:?}", args);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("only applies to csv"), "got: {}", stderr);
    }
}

#[test]
fn as_unicode_without_format_is_usage_error() {
    let output = winclip_bin()
        .args(["get", "--as-unicode"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
