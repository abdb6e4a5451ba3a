#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_launcher-cli"));
    cmd.args(args);
    for key in [
        "LAUNCHER_PICKER",
        "LAUNCHER_PICKER_ARGS",
        "LAUNCHER_OPENER",
        "LAUNCHER_SEARCH_URL",
        "LAUNCHER_PROMPT",
        "LAUNCHER_SUBPROMPT",
        "LAUNCHER_CATALOG",
    ] {
        cmd.env_remove(key);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run launcher-cli")
}

/// Picker scripts run through `sh`, so they need no exec bit.
fn write_picker(dir: &Path, body: &str) -> String {
    let path = dir.join("picker.sh");
    fs::write(&path, format!("cat > /dev/null\n{body}\n")).expect("write picker script");
    path.to_string_lossy().to_string()
}

fn write_recording_opener(dir: &Path, record: &Path) -> String {
    let path = dir.join("opener.sh");
    let script = format!(
        "#!/bin/sh\nprintf '%s' \"$1\" > '{0}.part' && mv '{0}.part' '{0}'\n",
        record.display()
    );
    fs::write(&path, script).expect("write opener script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod opener script");
    path.to_string_lossy().to_string()
}

fn wait_for_file(path: &Path) -> Option<String> {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Ok(contents) = fs::read_to_string(path) {
            return Some(contents);
        }
        thread::sleep(Duration::from_millis(20));
    }
    None
}

#[test]
fn list_prints_builtin_catalog_in_order() {
    let output = run_cli(&["list"], &[]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let names = stdout.lines().collect::<Vec<_>>();
    assert_eq!(names.first(), Some(&"Localhost"));
    assert!(names.contains(&"GitHub"));
    assert_eq!(names.last(), Some(&"WakaTime"));
}

#[test]
fn classify_json_resolves_catalog_shortcut() {
    let output = run_cli(&["classify", "--query", "GitHub", "--output", "json"], &[]);
    assert_eq!(output.status.code(), Some(0));

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(
        json.get("kind").and_then(Value::as_str),
        Some("static-direct")
    );
    assert_eq!(
        json.get("target").and_then(Value::as_str),
        Some("https://github.com")
    );
}

#[test]
fn classify_honours_search_url_override() {
    let output = run_cli(
        &["classify", "--query", "rust borrow checker"],
        &[("LAUNCHER_SEARCH_URL", "https://duckduckgo.com/?q={}")],
    );
    assert_eq!(output.status.code(), Some(0));

    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "free-text\thttps://duckduckgo.com/?q=rust+borrow+checker"
    );
}

#[test]
fn invalid_search_url_is_usage_error() {
    let output = run_cli(
        &["classify", "--query", "x"],
        &[("LAUNCHER_SEARCH_URL", "https://example.com/search")],
    );
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: invalid LAUNCHER_SEARCH_URL"));
}

#[test]
fn catalog_file_replaces_builtin_entries() {
    let temp = tempfile::tempdir().expect("temp dir");
    let catalog = temp.path().join("catalog.toml");
    fs::write(
        &catalog,
        "[[entry]]\nname = \"Crates\"\ntarget = \"https://crates.io\"\n",
    )
    .expect("write catalog");
    let catalog = catalog.to_string_lossy().to_string();

    let output = run_cli(
        &["classify", "--query", "Crates"],
        &[("LAUNCHER_CATALOG", catalog.as_str())],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "static-direct\thttps://crates.io"
    );
}

#[test]
fn malformed_catalog_file_is_usage_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let catalog = temp.path().join("catalog.toml");
    fs::write(&catalog, "[[entry]]\nname = \"Broken\"\n").expect("write catalog");
    let catalog = catalog.to_string_lossy().to_string();

    let output = run_cli(&["list"], &[("LAUNCHER_CATALOG", catalog.as_str())]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn run_cancel_exits_cleanly_without_opening() {
    let temp = tempfile::tempdir().expect("temp dir");
    let picker = write_picker(temp.path(), "exit 1");
    let record = temp.path().join("opened.txt");
    let opener = write_recording_opener(temp.path(), &record);

    let output = run_cli(
        &["run"],
        &[
            ("LAUNCHER_PICKER", "sh"),
            ("LAUNCHER_PICKER_ARGS", picker.as_str()),
            ("LAUNCHER_OPENER", opener.as_str()),
        ],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "cancelled"
    );
    assert!(!record.exists());
}

#[test]
fn run_hands_search_url_to_opener() {
    let temp = tempfile::tempdir().expect("temp dir");
    let picker = write_picker(temp.path(), "echo 'how to sort a list'");
    let record = temp.path().join("opened.txt");
    let opener = write_recording_opener(temp.path(), &record);

    let output = run_cli(
        &["run"],
        &[
            ("LAUNCHER_PICKER", "sh"),
            ("LAUNCHER_PICKER_ARGS", picker.as_str()),
            ("LAUNCHER_OPENER", opener.as_str()),
        ],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        wait_for_file(&record).as_deref(),
        Some("https://www.google.com/search?q=how+to+sort+a+list")
    );
}

#[test]
fn run_nested_entry_uses_second_prompt_label() {
    let temp = tempfile::tempdir().expect("temp dir");
    // The label arrives as $1: answer the primary prompt with the shortcut
    // and the secondary prompt with a port.
    let picker = write_picker(
        temp.path(),
        "if [ \"$1\" = Port ]; then echo 8080; else echo Localhost; fi",
    );
    let record = temp.path().join("opened.txt");
    let opener = write_recording_opener(temp.path(), &record);

    let output = run_cli(
        &["run"],
        &[
            ("LAUNCHER_PICKER", "sh"),
            ("LAUNCHER_PICKER_ARGS", picker.as_str()),
            ("LAUNCHER_OPENER", opener.as_str()),
        ],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        wait_for_file(&record).as_deref(),
        Some("http://localhost:8080")
    );
}

#[test]
fn run_passes_configured_prompt_labels_to_picker() {
    let temp = tempfile::tempdir().expect("temp dir");
    let picker = write_picker(
        temp.path(),
        "case \"$1\" in go) echo Localhost ;; 'which port') echo 3000 ;; *) exit 2 ;; esac",
    );
    let record = temp.path().join("opened.txt");
    let opener = write_recording_opener(temp.path(), &record);

    let output = run_cli(
        &["run"],
        &[
            ("LAUNCHER_PICKER", "sh"),
            ("LAUNCHER_PICKER_ARGS", picker.as_str()),
            ("LAUNCHER_OPENER", opener.as_str()),
            ("LAUNCHER_PROMPT", "go"),
            ("LAUNCHER_SUBPROMPT", "which port"),
        ],
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        wait_for_file(&record).as_deref(),
        Some("http://localhost:3000")
    );
}

#[test]
fn run_missing_picker_is_runtime_error() {
    let output = run_cli(
        &["run"],
        &[("LAUNCHER_PICKER", "/nonexistent/launcher-picker")],
    );
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: picker unavailable"));
}

#[test]
fn run_missing_opener_still_exits_cleanly() {
    let temp = tempfile::tempdir().expect("temp dir");
    let picker = write_picker(temp.path(), "echo GitHub");

    let output = run_cli(
        &["run"],
        &[
            ("LAUNCHER_PICKER", "sh"),
            ("LAUNCHER_PICKER_ARGS", picker.as_str()),
            ("LAUNCHER_OPENER", "/nonexistent/launcher-opener"),
        ],
    );
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("could not open https://github.com"));
}
