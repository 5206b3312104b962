//! Custom assertion helpers for git-cp integration tests.

use std::path::Path;

use super::git_helpers;

/// Assert that a repo is on the expected branch.
pub fn assert_on_branch(repo_path: &Path, expected: &str) {
    let actual = git_helpers::current_branch(repo_path);
    assert_eq!(
        actual,
        expected,
        "Expected repo at {} to be on branch '{}', but was on '{}'",
        repo_path.display(),
        expected,
        actual
    );
}

/// Assert that a local branch exists in the repo.
pub fn assert_branch_exists(repo_path: &Path, branch_name: &str) {
    assert!(
        git_helpers::branch_exists(repo_path, branch_name),
        "Expected branch '{}' to exist in {}",
        branch_name,
        repo_path.display()
    );
}

/// Assert that a local branch does NOT exist in the repo.
pub fn assert_branch_not_exists(repo_path: &Path, branch_name: &str) {
    assert!(
        !git_helpers::branch_exists(repo_path, branch_name),
        "Expected branch '{}' to NOT exist in {}",
        branch_name,
        repo_path.display()
    );
}

/// Assert the subjects on `rev`, newest first.
pub fn assert_subjects(repo_path: &Path, rev: &str, expected: &[&str]) {
    let actual = git_helpers::subjects(repo_path, rev);
    assert_eq!(
        actual, expected,
        "Unexpected history on '{}' in {}",
        rev,
        repo_path.display()
    );
}

/// Assert no cherry-pick was left half-done.
pub fn assert_no_cherry_pick_in_progress(repo_path: &Path) {
    assert!(
        !git_helpers::cherry_pick_in_progress(repo_path),
        "Expected no cherry-pick in progress in {}",
        repo_path.display()
    );
}
