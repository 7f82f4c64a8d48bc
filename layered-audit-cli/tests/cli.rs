use std::path::Path;
use std::process::Command;

fn layered_audit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_layered-audit"))
}

#[test]
fn test_missing_directory_exits_with_diagnostic() {
    let output = layered_audit()
        .arg("/nonexistent/corpus")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("path not found or not a directory: /nonexistent/corpus"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let output = layered_audit().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_fixture_corpus_report() {
    let corpus = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join("news");
    let output = layered_audit()
        .arg(&corpus)
        .args(["--color", "never"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("United States Holocaust Memorial Museum :"));
    assert!(stdout.starts_with("2015 general election  [EVENT, PERIOD] :"));
}
