//! Read-only repository queries
//!
//! Every query here is best-effort: a failed command degrades to an empty or
//! sentinel value instead of an error. Callers treat empty as "unknown", not
//! necessarily "does not exist" ([`branch_exists`] is the exception).

use std::path::PathBuf;

use tracing::debug;

use super::{CommandResult, CommandRunner, GitError};
use crate::core::commit::{parse_log, Commit, LOG_FORMAT};

/// Reported by [`current_branch`] when no branch is checked out
pub const DETACHED_HEAD: &str = "HEAD";

/// Run a query, folding spawn errors into a failed result.
fn query(runner: &dyn CommandRunner, args: &[&str]) -> CommandResult {
    match runner.run(args) {
        Ok(result) => result,
        Err(e) => {
            debug!(?args, error = %e, "query failed to run");
            CommandResult::failed(-1, e.to_string())
        }
    }
}

/// True iff git reports the working directory is inside a work tree.
pub fn is_repository(runner: &dyn CommandRunner) -> bool {
    let result = query(runner, &["rev-parse", "--is-inside-work-tree"]);
    result.success && result.stdout.trim() == "true"
}

/// Like [`is_repository`], as an error for `?` propagation.
pub fn require_repository(runner: &dyn CommandRunner) -> Result<(), GitError> {
    if is_repository(runner) {
        Ok(())
    } else {
        Err(GitError::NotARepository(
            runner.workdir().display().to_string(),
        ))
    }
}

/// Top-level directory of the working tree.
pub fn repository_root(runner: &dyn CommandRunner) -> Option<PathBuf> {
    let result = query(runner, &["rev-parse", "--show-toplevel"]);
    let root = result.stdout.trim();
    if result.success && !root.is_empty() {
        Some(PathBuf::from(root))
    } else {
        None
    }
}

/// Current branch name, or [`DETACHED_HEAD`] if none is checked out.
pub fn current_branch(runner: &dyn CommandRunner) -> String {
    let result = query(runner, &["branch", "--show-current"]);
    let name = result.stdout.trim();
    if result.success && !name.is_empty() {
        name.to_string()
    } else {
        DETACHED_HEAD.to_string()
    }
}

/// All local and remote branch short names, in first-seen order.
pub fn list_branches(runner: &dyn CommandRunner) -> Vec<String> {
    let result = query(runner, &["branch", "-a", "--format=%(refname:short)"]);
    if !result.success {
        return Vec::new();
    }
    parse_branch_list(&result.stdout)
}

/// Trim, strip the current-branch marker and de-duplicate branch names.
pub fn parse_branch_list(output: &str) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();
    for line in output.lines() {
        let name = line.trim().trim_start_matches('*').trim();
        if name.is_empty() || branches.iter().any(|b| b == name) {
            continue;
        }
        branches.push(name.to_string());
    }
    branches
}

/// Exact-match lookup of a local branch.
pub fn branch_exists(runner: &dyn CommandRunner, name: &str) -> bool {
    let result = query(runner, &["branch", "--list", name]);
    result.success && !result.stdout.trim().is_empty()
}

/// Up to `limit` commits of `branch`, newest first.
///
/// Empty on any failure or empty output.
pub fn list_commits(runner: &dyn CommandRunner, branch: &str, limit: usize) -> Vec<Commit> {
    let max_count = format!("--max-count={}", limit);
    let result = query(
        runner,
        &["log", branch, &max_count, LOG_FORMAT, "--date=short"],
    );
    if !result.success || result.stdout.trim().is_empty() {
        return Vec::new();
    }
    parse_log(&result.stdout)
}

/// Paths currently marked unmerged in the working tree.
pub fn conflicted_files(runner: &dyn CommandRunner) -> Vec<String> {
    let result = query(runner, &["diff", "--name-only", "--diff-filter=U"]);
    if !result.success {
        return Vec::new();
    }
    result
        .stdout
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fail with [`GitError::ConflictDetected`] if any path is unmerged.
pub fn ensure_conflict_free(runner: &dyn CommandRunner) -> Result<(), GitError> {
    let files = conflicted_files(runner);
    if files.is_empty() {
        Ok(())
    } else {
        Err(GitError::ConflictDetected(files))
    }
}

/// Raw diff text for one path; empty if unavailable.
pub fn conflict_diff(runner: &dyn CommandRunner, path: &str) -> String {
    let result = query(runner, &["diff", "--", path]);
    if result.success {
        result.stdout
    } else {
        String::new()
    }
}

/// Stage every pending change (`git add -A`).
pub fn stage_all(runner: &dyn CommandRunner) -> Result<CommandResult, GitError> {
    runner.run(&["add", "-A"])
}
