use std::path::Path;
use std::process::Command;

use vigil_core::{ENV_BASE_REF, ENV_MODEL, ENV_TOKEN, ENV_URL};

/// A `vigil` command in `dir` with all service variables scrubbed.
fn vigil_in(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    cmd.current_dir(dir)
        .env_remove(ENV_URL)
        .env_remove(ENV_TOKEN)
        .env_remove(ENV_BASE_REF)
        .env_remove(ENV_MODEL);
    cmd
}

#[test]
fn missing_both_required_vars_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = vigil_in(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(ENV_URL), "stderr was: {stderr}");
    assert!(stderr.contains(ENV_TOKEN), "stderr was: {stderr}");
    // Validation must fail before any diff collection is attempted.
    assert!(!stderr.contains("failed to collect diff"), "stderr was: {stderr}");
}

#[test]
fn missing_token_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = vigil_in(dir.path())
        .env(ENV_URL, "https://webui.example")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(ENV_TOKEN), "stderr was: {stderr}");
    assert!(!stderr.contains(ENV_URL), "stderr was: {stderr}");
}

#[test]
fn missing_url_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    let output = vigil_in(dir.path())
        .env(ENV_TOKEN, "sk-test")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(ENV_URL), "stderr was: {stderr}");
}

#[test]
fn diff_failure_still_exits_zero() {
    // Credentials present but the directory is not a git repository: the
    // collector fails, the run prints "No changes detected." and exits 0.
    let dir = tempfile::tempdir().unwrap();

    let output = vigil_in(dir.path())
        .env(ENV_URL, "https://webui.example")
        .env(ENV_TOKEN, "sk-test")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No changes detected."), "stdout was: {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to collect diff"), "stderr was: {stderr}");
}
