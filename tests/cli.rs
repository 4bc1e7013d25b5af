/*!
 * End-to-end tests for the copycode binary
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn copycode(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_copycode"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run copycode")
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = File::create(path).unwrap();
    write!(file, "{}", content).unwrap();
}

fn setup_project() -> tempfile::TempDir {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("demo");
    write_file(&root.join("main.py"), "print('hi')");
    write_file(&root.join("web").join("index.html"), "<p>hi</p>");
    write_file(&root.join("node_modules").join("dep.js"), "ignored");
    temp_dir
}

#[test]
fn test_stdout_document() {
    let temp_dir = setup_project();
    let root = temp_dir.path().join("demo");

    let output = copycode(&[root.to_str().unwrap(), "--stdout"]);
    assert!(output.status.success());

    let expected = "```\n// File layout\n\ndemo/\n├── main.py\n└── web/\n    └── index.html\n```\n\n\
```py\n# main.py\nprint('hi')\n```\n\n\
```html\n<!-- web/index.html -->\n<p>hi</p>\n```";
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Copied code"));
}

#[test]
fn test_output_file() {
    let temp_dir = setup_project();
    let root = temp_dir.path().join("demo");
    let output_file = temp_dir.path().join("out.md");

    let output = copycode(&[
        root.to_str().unwrap(),
        "-o",
        output_file.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&output_file).unwrap();
    assert!(written.starts_with("```\n// File layout\n\ndemo/\n"));
    assert!(written.contains("```py\n# main.py\n"));
    assert!(!written.contains("node_modules"));
}

#[test]
fn test_single_file() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("style.css");
    write_file(&file, "body {}");

    let output = copycode(&[file.to_str().unwrap(), "--stdout"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "```css\n/* style.css */\nbody {}\n```"
    );
}

#[test]
fn test_nonexistent_path_still_confirms() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("missing");

    let output = copycode(&[missing.to_str().unwrap(), "--stdout"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Copied code"));
}

#[test]
fn test_json_format() {
    let temp_dir = setup_project();
    let root = temp_dir.path().join("demo");

    let output = copycode(&[root.to_str().unwrap(), "--stdout", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "main.py");
    assert_eq!(files[0]["language_tag"], "py");
    assert_eq!(files[1]["comment_style"], "<!--");
}

#[test]
fn test_report_goes_to_stderr() {
    let temp_dir = setup_project();
    let root = temp_dir.path().join("demo");

    let output = copycode(&[root.to_str().unwrap(), "--stdout", "--report"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("main.py"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Total"));
}

#[test]
fn test_invalid_threads_fails() {
    let temp_dir = setup_project();
    let root = temp_dir.path().join("demo");

    let output = copycode(&[root.to_str().unwrap(), "--stdout", "--threads", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(output.stdout.is_empty());
}
