//! External command execution
//!
//! Every git interaction in the crate goes through a [`CommandRunner`]. The
//! production runner, [`GitCommand`], spawns `git` synchronously in a fixed
//! working directory and captures its output to completion.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::GitError;
use crate::util::log_cmd;

/// Environment override that turns any editor step into a no-op.
///
/// `git cherry-pick --continue` opens the commit message editor otherwise.
pub const EDITOR_OVERRIDE: (&str, &str) = ("GIT_EDITOR", "true");

/// Outcome of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// `true` iff the exit code was 0
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// Raw exit code; -1 when the process was terminated by a signal
    pub exit_code: i32,
}

impl CommandResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: exit_code == 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    /// Failed result with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(exit_code, "", stderr)
    }

    /// Stdout and stderr joined for display, stdout first.
    ///
    /// Falls back to whichever stream is non-blank.
    pub fn combined_output(&self) -> String {
        let out_blank = self.stdout.trim().is_empty();
        let err_blank = self.stderr.trim().is_empty();
        match (out_blank, err_blank) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }

    /// Convert a failed result into [`GitError::CommandFailure`].
    pub fn into_result(self) -> Result<Self, GitError> {
        if self.success {
            Ok(self)
        } else {
            Err(GitError::CommandFailure {
                exit_code: self.exit_code,
                output: self.combined_output().trim().to_string(),
            })
        }
    }
}

/// Runs a single external command and captures its result.
///
/// Implementations are stateless with respect to the caller: no retries, no
/// caching. Only a failure to launch the program is an `Err`; a non-zero exit
/// code is reported through [`CommandResult`].
pub trait CommandRunner {
    /// Run the command with `args` and wait for it to exit.
    fn run(&self, args: &[&str]) -> Result<CommandResult, GitError>;

    /// Working directory every invocation runs in.
    fn workdir(&self) -> &Path;
}

/// Runs `git` in a repository working directory.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
    workdir: PathBuf,
}

impl GitCommand {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: "git".to_string(),
            workdir: workdir.into(),
        }
    }

    /// Use a different executable, e.g. an absolute path to git.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl CommandRunner for GitCommand {
    fn run(&self, args: &[&str]) -> Result<CommandResult, GitError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.workdir)
            .env(EDITOR_OVERRIDE.0, EDITOR_OVERRIDE.1)
            .stdin(Stdio::null());
        log_cmd(&cmd);

        // output() drains stdout and stderr concurrently until exit
        let output = cmd.output().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GitError::GitNotFound,
            _ => GitError::Io(e),
        })?;

        Ok(CommandResult::new(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_combined_output_both_streams() {
        let r = CommandResult::new(1, "out", "err");
        assert_eq!(r.combined_output(), "out\nerr");
    }

    #[test]
    fn test_combined_output_falls_back() {
        assert_eq!(CommandResult::new(1, "", "err").combined_output(), "err");
        assert_eq!(CommandResult::new(1, "out", "  \n").combined_output(), "out");
        assert_eq!(CommandResult::new(0, "", "").combined_output(), "");
    }

    #[test]
    fn test_success_tracks_exit_code() {
        assert!(CommandResult::ok("x").success);
        assert!(!CommandResult::failed(128, "fatal").success);
        assert_eq!(CommandResult::failed(128, "fatal").exit_code, 128);
    }

    #[test]
    fn test_into_result_failure_carries_output() {
        let err = CommandResult::new(1, "partial", "error: boom")
            .into_result()
            .unwrap_err();
        match err {
            GitError::CommandFailure { exit_code, output } => {
                assert_eq!(exit_code, 1);
                assert_eq!(output, "partial\nerror: boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_git_command_captures_exit_code() {
        let temp = TempDir::new().unwrap();
        let runner = GitCommand::new(temp.path());
        let result = runner.run(&["rev-parse", "--is-inside-work-tree"]).unwrap();
        assert!(!result.success);
        assert_ne!(result.exit_code, 0);
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn test_git_command_sets_editor_override() {
        let temp = TempDir::new().unwrap();
        let runner = GitCommand::new(temp.path());
        runner.run(&["init", "-q"]).unwrap();
        let result = runner.run(&["var", "GIT_EDITOR"]).unwrap();
        assert!(result.success, "{}", result.combined_output());
        assert_eq!(result.stdout.trim(), "true");
    }

    #[test]
    fn test_missing_program_is_git_not_found() {
        let temp = TempDir::new().unwrap();
        let runner = GitCommand::new(temp.path()).with_program("git-cp-definitely-missing");
        assert!(matches!(
            runner.run(&["status"]),
            Err(GitError::GitNotFound)
        ));
    }
}
