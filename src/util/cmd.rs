//! Command logging utilities for verbose output.

use std::process::Command;
use tracing::debug;

/// Log a command just before execution.
///
/// Emits a `tracing::debug!` event with the program name, arguments, working
/// directory and any per-command environment overrides. Visible when running
/// with `--verbose` or via `RUST_LOG=git_cp::cmd=debug`.
pub fn log_cmd(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let cwd = cmd
        .get_current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let envs: Vec<_> = cmd
        .get_envs()
        .map(|(k, v)| {
            format!(
                "{}={}",
                k.to_string_lossy(),
                v.map(|v| v.to_string_lossy()).unwrap_or_default()
            )
        })
        .collect();
    debug!(
        target: "git_cp::cmd",
        %program,
        ?args,
        %cwd,
        ?envs,
        "exec"
    );
}
