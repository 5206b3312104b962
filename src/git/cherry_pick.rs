//! Git cherry-pick operations
//!
//! These mutate the working tree. Results are returned untouched so the
//! caller decides what a failure means.

use super::{CommandResult, CommandRunner, GitError};

/// Cherry-pick a single commit onto the current branch
pub fn cherry_pick(runner: &dyn CommandRunner, commit_sha: &str) -> Result<CommandResult, GitError> {
    runner.run(&["cherry-pick", commit_sha])
}

/// Continue an in-progress cherry-pick after conflicts were resolved
pub fn cherry_pick_continue(runner: &dyn CommandRunner) -> Result<CommandResult, GitError> {
    runner.run(&["cherry-pick", "--continue"])
}

/// Skip the commit currently being picked
pub fn cherry_pick_skip(runner: &dyn CommandRunner) -> Result<CommandResult, GitError> {
    runner.run(&["cherry-pick", "--skip"])
}

/// Abort the in-progress cherry-pick and restore the pre-pick state
pub fn cherry_pick_abort(runner: &dyn CommandRunner) -> Result<CommandResult, GitError> {
    runner.run(&["cherry-pick", "--abort"])
}

/// Check if a cherry-pick is in progress
pub fn cherry_pick_in_progress(runner: &dyn CommandRunner) -> bool {
    runner
        .run(&["rev-parse", "-q", "--verify", "CHERRY_PICK_HEAD"])
        .map(|r| r.success)
        .unwrap_or(false)
}
