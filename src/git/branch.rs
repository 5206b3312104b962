//! Target branch operations

use super::{CommandResult, CommandRunner, GitError};

/// Validate a user-supplied target branch name.
///
/// Only rejects what the prompt rejects: empty names and embedded
/// whitespace. Everything else is left for git to judge at checkout.
pub fn validate_branch_name(name: &str) -> Result<(), GitError> {
    if name.trim().is_empty() {
        return Err(GitError::InvalidBranchName(
            "Branch name cannot be empty.".to_string(),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(GitError::InvalidBranchName(
            "Branch name cannot contain spaces.".to_string(),
        ));
    }
    Ok(())
}

/// Check out an existing branch (`git checkout <name>`).
pub fn checkout_existing(runner: &dyn CommandRunner, name: &str) -> Result<CommandResult, GitError> {
    runner.run(&["checkout", name])
}

/// Create and check out a new branch (`git checkout -b <name>`).
pub fn checkout_new(runner: &dyn CommandRunner, name: &str) -> Result<CommandResult, GitError> {
    runner.run(&["checkout", "-b", name])
}

/// A friendlier explanation for well-known checkout failures.
pub fn checkout_hint(branch_name: &str, stderr: &str) -> Option<String> {
    if stderr.contains("is already used by worktree at") || stderr.contains("is already checked out at") {
        if let Some(path_start) = stderr.find(" at '") {
            let path_part = &stderr[path_start + 5..];
            if let Some(path_end) = path_part.find('\'') {
                return Some(format!(
                    "Branch '{}' is checked out in another worktree at '{}'. \
                     Use a different target branch or work in that worktree.",
                    branch_name,
                    &path_part[..path_end]
                ));
            }
        }
        return Some(format!(
            "Branch '{}' is already checked out in another worktree.",
            branch_name
        ));
    }
    if stderr.contains("would be overwritten by checkout") {
        return Some("Commit or stash your local changes before switching branches.".to_string());
    }
    None
}
