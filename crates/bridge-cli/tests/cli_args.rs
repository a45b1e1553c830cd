//! Argument-validation and directory-bootstrap integration tests, in the
//! style of this codebase's `kargo-cli/tests/cli_env.rs`
//! (`assert_cmd::Command::cargo_bin`, `predicates`, `tempfile::TempDir`).
//! Limited to paths that fail before any network access, since `Fetcher`
//! has no injectable test double — the download/publish pipeline itself is
//! exercised by the unit tests in `bridge-maven`/`bridge-savant`/`bridge-graph`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn bridge_cmd() -> Command {
    Command::cargo_bin("bridge").unwrap()
}

#[test]
fn directory_argument_naming_an_existing_file_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("not-a-directory");
    std::fs::write(&file_path, b"x").unwrap();

    bridge_cmd()
        .env("SAVANT_BRIDGE_PROMPT", "false")
        .args([file_path.to_str().unwrap(), "com.example:widget:1.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a file, not a directory"));
}

#[test]
fn missing_coordinate_without_prompts_exits_nonzero() {
    let tmp = TempDir::new().unwrap();

    bridge_cmd()
        .env("SAVANT_BRIDGE_PROMPT", "false")
        .args([tmp.path().to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn malformed_coordinate_argument_exits_nonzero() {
    let tmp = TempDir::new().unwrap();

    bridge_cmd()
        .env("SAVANT_BRIDGE_PROMPT", "false")
        .args([tmp.path().to_str().unwrap(), "com.example:widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a group:id:version coordinate"));
}

#[test]
fn missing_directory_is_created() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("fresh-repo");
    assert!(!target.exists());

    // Will fail past bootstrap (no network in this sandbox), but the
    // directory must exist by the time the process exits.
    let _ = bridge_cmd()
        .env("SAVANT_BRIDGE_PROMPT", "false")
        .args([target.to_str().unwrap(), "com.example:widget"])
        .assert();

    assert!(target.is_dir());
}
