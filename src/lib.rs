//! git-cp - interactive cherry-pick orchestration
//!
//! Pick commits from one branch, apply them onto another in order, resolve
//! conflicts along the way and optionally push the result. All VCS work is
//! delegated to the `git` CLI.

pub mod cli;
pub mod core;
pub mod git;
pub mod telemetry;
pub mod util;

pub use crate::core::{Commit, Config, PushOutcome, Session, SessionReport, SessionState, Summary};
pub use crate::git::{CommandResult, CommandRunner, GitCommand, GitError};
