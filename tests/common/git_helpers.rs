//! Git helper utilities for integration tests.
//!
//! Builds throwaway repositories, bare remotes and branches with the `git`
//! CLI so tests run offline.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Initialize a bare git repository at the given path.
pub fn init_bare_repo(path: &Path) {
    fs::create_dir_all(path).unwrap();
    let status = Command::new("git")
        .args(["init", "--bare", "-b", "main"])
        .current_dir(path)
        .output()
        .expect("failed to init bare repo");
    assert!(
        status.status.success(),
        "git init --bare failed: {}",
        String::from_utf8_lossy(&status.stderr)
    );
}

/// Initialize a non-bare git repository with user config.
pub fn init_repo(path: &Path) {
    fs::create_dir_all(path).unwrap();
    git(path, &["init", "-b", "main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
}

/// Create a file, stage, and commit it. Returns the commit hash.
pub fn commit_file(repo_path: &Path, filename: &str, content: &str, message: &str) -> String {
    fs::write(repo_path.join(filename), content).unwrap();
    git(repo_path, &["add", filename]);
    git(repo_path, &["commit", "-m", message]);
    get_head_sha(repo_path)
}

/// Create and checkout a new branch.
pub fn create_branch(repo_path: &Path, branch_name: &str) {
    git(repo_path, &["checkout", "-b", branch_name]);
}

/// Checkout an existing branch.
pub fn checkout(repo_path: &Path, branch_name: &str) {
    git(repo_path, &["checkout", branch_name]);
}

/// Add a remote to a repository.
pub fn add_remote(repo_path: &Path, name: &str, url: &str) {
    git(repo_path, &["remote", "add", name, url]);
}

/// Get the current branch name.
pub fn current_branch(repo_path: &Path) -> String {
    git_output(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Get upstream tracking branch for a local branch.
pub fn branch_upstream(repo_path: &Path, branch_name: &str) -> Option<String> {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args([
            "rev-parse",
            "--abbrev-ref",
            &format!("{}@{{upstream}}", branch_name),
        ])
        .output()
        .unwrap_or_else(|e| panic!("failed to run git rev-parse for upstream: {}", e));

    if !output.status.success() {
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Commit subjects reachable from `rev`, newest first.
pub fn subjects(repo_path: &Path, rev: &str) -> Vec<String> {
    git_output(repo_path, &["log", "--format=%s", rev])
        .lines()
        .map(str::to_string)
        .collect()
}

/// Get HEAD sha.
pub fn get_head_sha(repo_path: &Path) -> String {
    git_output(repo_path, &["rev-parse", "HEAD"])
}

/// Check if a local branch exists.
pub fn branch_exists(repo_path: &Path, branch_name: &str) -> bool {
    Command::new("git")
        .args([
            "rev-parse",
            "--verify",
            &format!("refs/heads/{}", branch_name),
        ])
        .current_dir(repo_path)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check if `CHERRY_PICK_HEAD` is present.
pub fn cherry_pick_in_progress(repo_path: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "-q", "--verify", "CHERRY_PICK_HEAD"])
        .current_dir(repo_path)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A repository with `main` (one commit touching `shared.txt`) and `feature`
/// (three more commits, each adding its own file).
///
/// Returns the feature commit hashes oldest first. `main` is checked out.
pub fn feature_repo() -> (TempDir, Vec<String>) {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_repo(dir);
    commit_file(dir, "shared.txt", "base\n", "initial");

    create_branch(dir, "feature");
    let hashes = (1..=3)
        .map(|i| {
            commit_file(
                dir,
                &format!("f{}.txt", i),
                &format!("feature {}\n", i),
                &format!("feature commit {}", i),
            )
        })
        .collect();
    checkout(dir, "main");
    (temp, hashes)
}

/// Run a git command, panic on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run a git command and return trimmed stdout.
pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
