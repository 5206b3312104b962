//! Push the target branch after a session
//!
//! At most two attempts: a plain push, then one retry with
//! `--set-upstream` only when the first failure says no upstream exists.

use tracing::debug;

use crate::git::remote::{
    is_no_upstream_error, push_branch, push_branch_set_upstream, remote_exists,
};
use crate::git::{CommandResult, CommandRunner, GitError};

/// Every push attempt made, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub attempts: Vec<CommandResult>,
    /// Whether the upstream-setting retry was used
    pub set_upstream: bool,
}

impl PushOutcome {
    pub fn succeeded(&self) -> bool {
        self.last().is_some_and(|r| r.success)
    }

    /// Result of the final attempt
    pub fn last(&self) -> Option<&CommandResult> {
        self.attempts.last()
    }

    /// Classify a failed outcome into a [`GitError`].
    pub fn into_result(self) -> Result<Self, GitError> {
        match self.last() {
            Some(r) if r.success => Ok(self),
            Some(r) if is_no_upstream_error(&r.stderr) => Err(GitError::NoUpstreamConfigured {
                output: r.combined_output().trim().to_string(),
            }),
            Some(r) => Err(GitError::CommandFailure {
                exit_code: r.exit_code,
                output: r.combined_output().trim().to_string(),
            }),
            None => Err(GitError::CommandFailure {
                exit_code: -1,
                output: "no push attempted".to_string(),
            }),
        }
    }
}

/// Push is only offered when something was applied and the remote exists.
pub fn push_eligible(runner: &dyn CommandRunner, applied: usize, remote: &str) -> bool {
    applied >= 1 && remote_exists(runner, remote)
}

/// Push `branch` to `remote`, retrying once with upstream setup if needed.
pub fn push_with_upstream_retry(
    runner: &dyn CommandRunner,
    remote: &str,
    branch: &str,
) -> Result<PushOutcome, GitError> {
    let first = push_branch(runner, branch, remote)?;
    let retry = !first.success && is_no_upstream_error(&first.stderr);
    let mut outcome = PushOutcome {
        attempts: vec![first],
        set_upstream: false,
    };

    if retry {
        debug!(remote, branch, "no upstream configured; retrying with --set-upstream");
        outcome.attempts.push(push_branch_set_upstream(runner, branch, remote)?);
        outcome.set_upstream = true;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::ScriptedRunner;

    const NO_UPSTREAM: &str = "fatal: The current branch topic has no upstream branch.\n\
                               To push the current branch and set the remote as upstream, use\n";

    #[test]
    fn test_first_push_succeeds() {
        let runner = ScriptedRunner::new().expect(&["push", "origin", "topic"], CommandResult::ok(""));
        let outcome = push_with_upstream_retry(&runner, "origin", "topic").unwrap();
        assert!(outcome.succeeded());
        assert_eq!(outcome.attempts.len(), 1);
        assert!(!outcome.set_upstream);
    }

    #[test]
    fn test_retries_once_on_missing_upstream() {
        let runner = ScriptedRunner::new()
            .expect(&["push", "origin", "topic"], CommandResult::failed(128, NO_UPSTREAM))
            .expect(
                &["push", "--set-upstream", "origin", "topic"],
                CommandResult::ok(""),
            );
        let outcome = push_with_upstream_retry(&runner, "origin", "topic").unwrap();
        assert!(outcome.succeeded());
        assert_eq!(outcome.attempts.len(), 2);
        assert!(outcome.set_upstream);
        assert_eq!(runner.count("push"), 2);
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn test_no_retry_for_other_failures() {
        let runner = ScriptedRunner::new().expect(
            &["push", "origin", "topic"],
            CommandResult::failed(1, "! [rejected] topic -> topic (non-fast-forward)"),
        );
        let outcome = push_with_upstream_retry(&runner, "origin", "topic").unwrap();
        assert!(!outcome.succeeded());
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(runner.count("push"), 1);
        assert!(matches!(
            outcome.into_result(),
            Err(GitError::CommandFailure { exit_code: 1, .. })
        ));
    }

    #[test]
    fn test_at_most_two_attempts_when_retry_also_fails() {
        let runner = ScriptedRunner::new()
            .expect(&["push", "origin", "topic"], CommandResult::failed(128, NO_UPSTREAM))
            .expect(
                &["push", "--set-upstream", "origin", "topic"],
                CommandResult::failed(128, NO_UPSTREAM),
            );
        let outcome = push_with_upstream_retry(&runner, "origin", "topic").unwrap();
        assert!(!outcome.succeeded());
        assert_eq!(outcome.attempts.len(), 2);
        assert_eq!(runner.calls().len(), 2);
        assert!(matches!(
            outcome.into_result(),
            Err(GitError::NoUpstreamConfigured { .. })
        ));
    }

    #[test]
    fn test_push_eligible() {
        let with_remote = || {
            ScriptedRunner::new().expect(
                &["remote", "get-url", "origin"],
                CommandResult::ok("file:///tmp/r.git\n"),
            )
        };
        assert!(push_eligible(&with_remote(), 1, "origin"));
        assert!(!push_eligible(&with_remote(), 0, "origin"));
        assert!(!push_eligible(&ScriptedRunner::new(), 3, "origin"));
    }

    #[test]
    fn test_ineligible_without_applied_issues_no_commands() {
        let runner = ScriptedRunner::new();
        assert!(!push_eligible(&runner, 0, "origin"));
        assert!(runner.calls().is_empty());
    }
}
