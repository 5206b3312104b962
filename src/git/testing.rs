//! Scripted command runner for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::{CommandResult, CommandRunner, GitError};

/// Replays canned results for expected argument lists and records every call.
///
/// Each expectation is consumed once, in the order it was added among
/// expectations with the same arguments. Unscripted calls fail with exit 1.
pub struct ScriptedRunner {
    workdir: PathBuf,
    script: RefCell<VecDeque<(Vec<String>, CommandResult)>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            workdir: PathBuf::from("/scripted"),
            script: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn expect(self, args: &[&str], result: CommandResult) -> Self {
        self.script
            .borrow_mut()
            .push_back((args.iter().map(|a| a.to_string()).collect(), result));
        self
    }

    /// Every invocation so far, args joined by a space.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of invocations whose joined args start with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Expectations that were never consumed.
    pub fn pending(&self) -> usize {
        self.script.borrow().len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, args: &[&str]) -> Result<CommandResult, GitError> {
        self.calls.borrow_mut().push(args.join(" "));
        let mut script = self.script.borrow_mut();
        let pos = script
            .iter()
            .position(|(expected, _)| expected.iter().map(String::as_str).eq(args.iter().copied()));
        match pos.and_then(|i| script.remove(i)) {
            Some((_, result)) => Ok(result),
            None => Ok(CommandResult::failed(
                1,
                format!("unscripted command: git {}", args.join(" ")),
            )),
        }
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}
