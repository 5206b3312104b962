//! Cherry-pick session state machine
//!
//! A [`Session`] owns the ordered commit queue and the applied/skipped
//! counters for one run. Each call to [`Session::step`] performs exactly one
//! transition. Decisions that need a human (skip, abort, "I fixed it") are
//! delegated to a [`Resolver`], which is also told about progress through
//! [`SessionEvent`]s.
//!
//! ```text
//! Ready ──► Applying(c) ──ok──► Applied(c) ──► Ready
//!   │            │
//!   │            └─fail─► conflicted files?
//!   │                      ├─ none ─► OtherFailure(c) ── skip ──► Skipped(c) ──► Ready
//!   │                      │                          └─ abort ─► Aborted
//!   │                      └─ some ─► Conflicted(c) ── fixed ─► Resolving(c) ─ok─► Applied(c)
//!   │                                                │                        └fail─► Ready
//!   │                                                ├─ skip ──► Skipped(c)
//!   │                                                └─ abort ─► Aborted
//!   └─ queue empty ─► Completed
//! ```
//!
//! A failed `--continue` returns to `Ready` without crediting the commit as
//! applied or skipped and without re-entering conflict resolution.

use std::collections::VecDeque;
use std::io;

use tracing::{debug, warn};

use super::commit::Commit;
use crate::git::cherry_pick::{
    cherry_pick, cherry_pick_abort, cherry_pick_continue, cherry_pick_skip,
};
use crate::git::inspect::{conflict_diff, conflicted_files, stage_all};
use crate::git::{CommandResult, CommandRunner, GitError};

/// Where the session currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting to take the next commit off the queue
    Ready,
    /// About to issue the cherry-pick for this commit
    Applying(Commit),
    /// The commit landed; counted on the next step
    Applied(Commit),
    /// The pick stopped on unmerged paths
    Conflicted {
        commit: Commit,
        files: Vec<String>,
        result: CommandResult,
    },
    /// The pick failed for a reason other than a merge conflict
    OtherFailure {
        commit: Commit,
        result: CommandResult,
    },
    /// The user resolved the conflict by hand; stage and continue next
    Resolving(Commit),
    /// The commit was skipped; counted on the next step
    Skipped(Commit),
    /// Stopped by "abort all"; remaining commits are never attempted
    Aborted,
    /// Every queued commit reached an outcome
    Completed,
}

impl SessionState {
    /// `Aborted` and `Completed` accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Aborted | SessionState::Completed)
    }
}

/// Answer to a non-conflict failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureChoice {
    Skip,
    AbortAll,
}

/// Answer to a merge conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Conflicts were fixed in the working tree; stage everything and continue
    FixedManually,
    Skip,
    AbortAll,
}

/// Progress notifications sent to the [`Resolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A commit is about to be cherry-picked. `index` is 1-based.
    Started {
        commit: Commit,
        index: usize,
        total: usize,
    },
    Applied {
        commit: Commit,
    },
    /// `--continue` failed after staging; the commit is left unresolved
    ContinueFailed {
        commit: Commit,
        stage: CommandResult,
        result: CommandResult,
    },
    Skipped {
        commit: Commit,
        result: CommandResult,
    },
    Aborted {
        commit: Commit,
        result: CommandResult,
    },
    Completed {
        applied: usize,
        skipped: usize,
    },
}

/// Read-only access to a conflict while the user decides what to do.
///
/// Viewing diffs never changes session state, so any number of reads in any
/// order is fine.
pub struct ConflictView<'a> {
    runner: &'a dyn CommandRunner,
    files: &'a [String],
}

impl<'a> ConflictView<'a> {
    pub fn new(runner: &'a dyn CommandRunner, files: &'a [String]) -> Self {
        Self { runner, files }
    }

    /// Conflicted paths, as reported right after the failed pick
    pub fn files(&self) -> &[String] {
        self.files
    }

    /// Raw diff for one path; empty if unavailable
    pub fn diff(&self, path: &str) -> String {
        conflict_diff(self.runner, path)
    }
}

/// Supplies the decisions a session cannot make by itself.
pub trait Resolver {
    /// Called on every [`SessionEvent`]. Defaults to doing nothing.
    fn on_event(&mut self, _event: &SessionEvent) {}

    /// A pick failed without conflicts: skip the commit or abort everything.
    fn on_failure(&mut self, commit: &Commit, result: &CommandResult) -> io::Result<FailureChoice>;

    /// A pick stopped on conflicts. May read diffs through `conflict` first.
    fn on_conflict(
        &mut self,
        commit: &Commit,
        conflict: &ConflictView<'_>,
    ) -> io::Result<ConflictChoice>;
}

/// Counters after a session finished (or at any point during it)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub applied: usize,
    pub skipped: usize,
    pub total: usize,
    /// Commits never attempted because the session was aborted
    pub remaining: usize,
    pub aborted: bool,
}

/// One cherry-pick run over an ordered commit sequence
pub struct Session<'r> {
    runner: &'r dyn CommandRunner,
    queue: VecDeque<Commit>,
    total: usize,
    applied: usize,
    skipped: usize,
    state: SessionState,
}

impl<'r> Session<'r> {
    /// `ordered` must already be in application order (oldest first).
    pub fn new(runner: &'r dyn CommandRunner, ordered: Vec<Commit>) -> Self {
        Self {
            runner,
            total: ordered.len(),
            queue: ordered.into(),
            applied: 0,
            skipped: 0,
            state: SessionState::Ready,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            applied: self.applied,
            skipped: self.skipped,
            total: self.total,
            remaining: self.queue.len(),
            aborted: self.state == SessionState::Aborted,
        }
    }

    /// Drive the session until it reaches a terminal state.
    ///
    /// On error the session stays in the state the failed step started from,
    /// so the caller can still report or resume it.
    pub fn run(&mut self, resolver: &mut dyn Resolver) -> Result<SessionReport, GitError> {
        while !self.is_finished() {
            self.step(resolver)?;
        }
        Ok(self.report())
    }

    /// Perform one transition and return the new state.
    ///
    /// Terminal states are left unchanged and issue no commands. If the step
    /// fails the current state is kept, so the commit in flight is not lost.
    pub fn step(&mut self, resolver: &mut dyn Resolver) -> Result<&SessionState, GitError> {
        let next = match self.state.clone() {
            SessionState::Ready => match self.queue.pop_front() {
                Some(commit) => {
                    let index = self.total - self.queue.len();
                    debug!(%commit, index, total = self.total, "next commit");
                    resolver.on_event(&SessionEvent::Started {
                        commit: commit.clone(),
                        index,
                        total: self.total,
                    });
                    SessionState::Applying(commit)
                }
                None => {
                    debug!(applied = self.applied, skipped = self.skipped, "session completed");
                    resolver.on_event(&SessionEvent::Completed {
                        applied: self.applied,
                        skipped: self.skipped,
                    });
                    SessionState::Completed
                }
            },
            SessionState::Applying(commit) => self.apply(commit)?,
            SessionState::Applied(commit) => {
                self.applied += 1;
                resolver.on_event(&SessionEvent::Applied { commit });
                SessionState::Ready
            }
            SessionState::OtherFailure { commit, result } => {
                match resolver.on_failure(&commit, &result)? {
                    FailureChoice::Skip => self.skip(commit, resolver)?,
                    FailureChoice::AbortAll => self.abort(commit, resolver)?,
                }
            }
            SessionState::Conflicted { commit, files, .. } => {
                let choice = resolver.on_conflict(&commit, &ConflictView::new(self.runner, &files))?;
                match choice {
                    ConflictChoice::FixedManually => SessionState::Resolving(commit),
                    ConflictChoice::Skip => self.skip(commit, resolver)?,
                    ConflictChoice::AbortAll => self.abort(commit, resolver)?,
                }
            }
            SessionState::Resolving(commit) => {
                let stage = stage_all(self.runner)?;
                let result = cherry_pick_continue(self.runner)?;
                if result.success {
                    SessionState::Applied(commit)
                } else {
                    warn!(commit = %commit.short_hash, exit_code = result.exit_code, "continue failed");
                    resolver.on_event(&SessionEvent::ContinueFailed {
                        commit,
                        stage,
                        result,
                    });
                    SessionState::Ready
                }
            }
            SessionState::Skipped(_) => {
                self.skipped += 1;
                SessionState::Ready
            }
            terminal @ (SessionState::Aborted | SessionState::Completed) => terminal,
        };
        debug!(state = state_name(&next), "session transition");
        self.state = next;
        Ok(&self.state)
    }

    fn apply(&self, commit: Commit) -> Result<SessionState, GitError> {
        let result = cherry_pick(self.runner, &commit.hash)?;
        if result.success {
            return Ok(SessionState::Applied(commit));
        }

        let files = conflicted_files(self.runner);
        debug!(
            commit = %commit.short_hash,
            exit_code = result.exit_code,
            conflicts = files.len(),
            "cherry-pick failed"
        );
        if files.is_empty() {
            Ok(SessionState::OtherFailure { commit, result })
        } else {
            Ok(SessionState::Conflicted {
                commit,
                files,
                result,
            })
        }
    }

    fn skip(&self, commit: Commit, resolver: &mut dyn Resolver) -> Result<SessionState, GitError> {
        let result = cherry_pick_skip(self.runner)?;
        resolver.on_event(&SessionEvent::Skipped {
            commit: commit.clone(),
            result,
        });
        Ok(SessionState::Skipped(commit))
    }

    fn abort(&self, commit: Commit, resolver: &mut dyn Resolver) -> Result<SessionState, GitError> {
        let result = cherry_pick_abort(self.runner)?;
        debug!(commit = %commit.short_hash, remaining = self.queue.len(), "session aborted");
        resolver.on_event(&SessionEvent::Aborted { commit, result });
        Ok(SessionState::Aborted)
    }
}

fn state_name(state: &SessionState) -> &'static str {
    match state {
        SessionState::Ready => "ready",
        SessionState::Applying(_) => "applying",
        SessionState::Applied(_) => "applied",
        SessionState::Conflicted { .. } => "conflicted",
        SessionState::OtherFailure { .. } => "other-failure",
        SessionState::Resolving(_) => "resolving",
        SessionState::Skipped(_) => "skipped",
        SessionState::Aborted => "aborted",
        SessionState::Completed => "completed",
    }
}
