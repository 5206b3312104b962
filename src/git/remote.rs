//! Git remote operations

use super::{CommandResult, CommandRunner, GitError};

#[cfg(feature = "telemetry")]
use std::time::Instant;
#[cfg(feature = "telemetry")]
use tracing::{debug, instrument};

/// Substring git prints when a branch has no upstream tracking branch
pub const NO_UPSTREAM_MARKER: &str = "no upstream";

/// Check whether a remote with the given name is configured
pub fn remote_exists(runner: &dyn CommandRunner, remote: &str) -> bool {
    runner
        .run(&["remote", "get-url", remote])
        .map(|r| r.success && !r.stdout.trim().is_empty())
        .unwrap_or(false)
}

/// Get the URL of a remote
pub fn get_remote_url(runner: &dyn CommandRunner, remote: &str) -> Option<String> {
    match runner.run(&["remote", "get-url", remote]) {
        Ok(r) if r.success => Some(r.stdout.trim().to_string()),
        _ => None,
    }
}

/// Whether a push failed only because no upstream tracking branch exists.
///
/// Case-sensitive, matching git's own lowercase wording.
pub fn is_no_upstream_error(stderr: &str) -> bool {
    stderr.contains(NO_UPSTREAM_MARKER)
}

/// Push a branch to a remote (`git push <remote> <branch>`)
pub fn push_branch(
    runner: &dyn CommandRunner,
    branch_name: &str,
    remote: &str,
) -> Result<CommandResult, GitError> {
    run_push(runner, branch_name, remote, false)
}

/// Push and set upstream (`git push --set-upstream <remote> <branch>`)
pub fn push_branch_set_upstream(
    runner: &dyn CommandRunner,
    branch_name: &str,
    remote: &str,
) -> Result<CommandResult, GitError> {
    run_push(runner, branch_name, remote, true)
}

#[cfg_attr(
    feature = "telemetry",
    instrument(skip(runner), fields(success))
)]
fn run_push(
    runner: &dyn CommandRunner,
    branch_name: &str,
    remote: &str,
    set_upstream: bool,
) -> Result<CommandResult, GitError> {
    #[cfg(feature = "telemetry")]
    let start = Instant::now();

    let mut args = vec!["push", remote, branch_name];
    if set_upstream {
        args.insert(1, "--set-upstream");
    }
    let result = runner.run(&args)?;

    #[cfg(feature = "telemetry")]
    {
        let duration = start.elapsed();
        tracing::Span::current().record("success", result.success);
        debug!(
            branch_name,
            remote,
            set_upstream,
            success = result.success,
            duration_ms = duration.as_millis() as u64,
            "Git push complete"
        );
    }

    Ok(result)
}

/// Interpret common git push errors into user-friendly hints
pub fn interpret_push_error(stderr: &str) -> Option<&'static str> {
    let lower = stderr.to_lowercase();
    if lower.contains("non-fast-forward") || lower.contains("fetch first") {
        return Some("Push rejected: the remote has changes. Pull and try again.");
    }
    if lower.contains("could not read from remote") || lower.contains("repository not found") {
        return Some("Cannot reach remote. Check your network connection and repository URL.");
    }
    if lower.contains("permission denied") || lower.contains("authentication failed") {
        return Some("Authentication failed. Refresh your git credentials.");
    }
    None
}
