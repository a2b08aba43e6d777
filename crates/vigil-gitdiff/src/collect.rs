use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use vigil_core::{DiffConfig, VigilError};

/// Collect the unified diff between `origin/<base>` and `HEAD`.
///
/// Fetches the base branch from `origin` first, with the child's stderr
/// discarded, then runs `git diff origin/<base>...HEAD` with the configured
/// pathspec exclusions. A single attempt, no retry; the caller treats any
/// error as "no changes to review".
///
/// # Errors
///
/// Returns [`VigilError::Git`] if either git command cannot be spawned or
/// exits with a non-success status.
pub async fn branch_diff(repo: &Path, config: &DiffConfig) -> Result<String, VigilError> {
    fetch_base(repo, &config.base_branch).await?;

    let output = git(repo)
        .args(diff_args(&config.base_branch, &config.exclude))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| VigilError::Git(format!("failed to run git diff: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VigilError::Git(format!(
            "git diff exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Fetch `<base>` from the remote named `origin`.
///
/// Fetch chatter on stderr is discarded; only the exit status matters.
async fn fetch_base(repo: &Path, base: &str) -> Result<(), VigilError> {
    let status = git(repo)
        .args(["fetch", "origin", base])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| VigilError::Git(format!("failed to run git fetch: {e}")))?;

    if !status.success() {
        return Err(VigilError::Git(format!(
            "git fetch origin {base} exited with {status}"
        )));
    }
    Ok(())
}

fn git(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    cmd
}

fn diff_args(base: &str, exclude: &[String]) -> Vec<String> {
    let mut args = vec![
        "diff".to_string(),
        format!("origin/{base}...HEAD"),
        "--".to_string(),
        ".".to_string(),
    ];
    args.extend(exclude.iter().map(|pattern| format!(":(exclude){pattern}")));
    args
}
