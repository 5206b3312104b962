//! Git operations wrapper
//!
//! Every operation shells out to the `git` CLI through a [`CommandRunner`].
//! The tool's exit code and output streams are the only source of truth;
//! nothing here reimplements VCS logic.

pub mod branch;
pub mod cherry_pick;
pub mod command;
pub mod inspect;
pub mod remote;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{CommandResult, CommandRunner, GitCommand};

use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("git exited with code {exit_code}: {output}")]
    CommandFailure { exit_code: i32, output: String },

    #[error("Unresolved conflicts in: {}", .0.join(", "))]
    ConflictDetected(Vec<String>),

    #[error("No upstream branch configured: {output}")]
    NoUpstreamConfigured { output: String },

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("git is required but was not found in PATH")]
    GitNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that a `git` executable is reachable on PATH.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}
