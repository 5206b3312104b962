//! Interactive cherry-pick command
//!
//! Walks the user from source branch to pushed target branch. Every prompt can
//! be answered up front with a flag, which is what makes the command scriptable.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::debug;

use crate::cli::output::Output;
use crate::cli::prompt::{
    confirm, input_target_branch, select_commits, select_source_branch, PromptResolver,
};
use crate::core::config::{Config, PushPolicy};
use crate::core::push::{push_eligible, push_with_upstream_retry};
use crate::core::sequence::{application_order, select_by_hash};
use crate::core::session::Session;
use crate::core::summary::Summary;
use crate::git::branch::{checkout_existing, checkout_hint, checkout_new, validate_branch_name};
use crate::git::cherry_pick::cherry_pick_in_progress;
use crate::git::inspect::{
    branch_exists, current_branch, ensure_conflict_free, list_branches, list_commits,
    repository_root, require_repository,
};
use crate::git::remote::{get_remote_url, interpret_push_error};
use crate::git::{git_available, CommandRunner, GitCommand, GitError};

/// Options for a pick run, already merged from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct PickOptions {
    pub repo: PathBuf,
    pub source: Option<String>,
    pub commits: Vec<String>,
    pub target: Option<String>,
    pub create: bool,
    pub limit: Option<usize>,
    pub remote: Option<String>,
    /// `Some(true)` for `--push`, `Some(false)` for `--no-push`
    pub push: Option<bool>,
    pub json: bool,
}

enum TargetOutcome {
    Ready,
    Declined,
    Failed,
}

/// Run the pick command
pub fn run_pick(opts: &PickOptions) -> anyhow::Result<ExitCode> {
    if !git_available() {
        Output::error(&GitError::GitNotFound.to_string());
        return Ok(ExitCode::FAILURE);
    }

    let runner = GitCommand::new(&opts.repo);
    if let Err(e) = require_repository(&runner) {
        debug!(error = %e, "repository check failed");
        Output::error("Not inside a git repository.");
        return Ok(ExitCode::FAILURE);
    }

    if let Some(target) = opts.target.as_deref() {
        if let Err(e) = validate_branch_name(target) {
            Output::error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    }

    let root = repository_root(&runner).unwrap_or_else(|| opts.repo.clone());
    let config = match Config::load(&root) {
        Ok(config) => config,
        Err(e) => {
            Output::error(&format!("Invalid configuration: {}", e));
            return Ok(ExitCode::FAILURE);
        }
    };
    let limit = opts.limit.unwrap_or(config.limit);
    let remote = opts.remote.clone().unwrap_or_else(|| config.remote.clone());
    debug!(limit, remote = %remote, push = ?config.push, "resolved configuration");

    if let Err(e) = ensure_conflict_free(&runner) {
        Output::error(&e.to_string());
        Output::notice("Resolve or abort the in-progress operation first.");
        return Ok(ExitCode::FAILURE);
    }
    if cherry_pick_in_progress(&runner) {
        Output::error("A cherry-pick is already in progress.");
        Output::notice("Finish it with `git cherry-pick --continue` or `--abort` first.");
        return Ok(ExitCode::FAILURE);
    }

    if !opts.json {
        Output::kv("Current branch", &Output::branch_name(&current_branch(&runner)));
    }

    let source = match &opts.source {
        Some(source) => source.clone(),
        None => {
            let branches = list_branches(&runner);
            if branches.is_empty() {
                warn_user(opts.json, "No branches found.");
                return Ok(ExitCode::SUCCESS);
            }
            select_source_branch(&branches)?
        }
    };

    let spinner = Output::spinner(&format!("Loading commits from {}…", source));
    let commits = list_commits(&runner, &source, limit);
    spinner.finish_and_clear();

    if commits.is_empty() {
        warn_user(opts.json, &format!("No commits found on {}.", source));
        return Ok(ExitCode::SUCCESS);
    }

    let selected = if opts.commits.is_empty() {
        if !opts.json {
            Output::header(&format!("Latest commits on {}", Output::branch_name(&source)));
            Output::commit_table(&commits);
            println!();
        }
        select_commits(&commits)?
    } else {
        match select_by_hash(&commits, &opts.commits) {
            Ok(selected) => selected,
            Err(missing) => {
                Output::error(&format!(
                    "Not among the last {} commits of {}: {}",
                    limit,
                    source,
                    missing.join(", ")
                ));
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    if selected.is_empty() {
        warn_user(opts.json, "No commits selected. Exiting.");
        return Ok(ExitCode::SUCCESS);
    }
    if !opts.json {
        Output::success(&format!("{} commit(s) selected.", selected.len()));
    }

    let target = match &opts.target {
        Some(target) => target.clone(),
        None => input_target_branch()?,
    };

    match switch_to_target(&runner, &target, opts.create, opts.json)? {
        TargetOutcome::Ready => {}
        TargetOutcome::Declined => {
            warn_user(opts.json, "Target branch not created. Nothing to do.");
            return Ok(ExitCode::SUCCESS);
        }
        TargetOutcome::Failed => return Ok(ExitCode::FAILURE),
    }

    let ordered = application_order(&selected);
    let mut resolver = if opts.json {
        PromptResolver::quiet()
    } else {
        PromptResolver::new()
    };
    let mut session = Session::new(&runner, ordered);
    let report = match session.run(&mut resolver) {
        Ok(report) => report,
        Err(e) => {
            let partial = session.report();
            Output::error(&format!("Cherry-pick stopped: {}", e));
            Output::notice(&format!(
                "{} applied, {} skipped, {} not attempted of {} selected.",
                partial.applied, partial.skipped, partial.remaining, partial.total
            ));
            if cherry_pick_in_progress(&runner) {
                Output::notice(
                    "A cherry-pick is still in progress. \
                     Finish it with `git cherry-pick --continue`, `--skip` or `--abort`.",
                );
            }
            return Ok(ExitCode::FAILURE);
        }
    };
    let summary = Summary::new(&report, &target);

    if !opts.json {
        Output::summary(&summary);
    }

    if push_eligible(&runner, summary.applied, &remote) {
        let should_push = match (opts.push, config.push) {
            (Some(answer), _) => answer,
            (None, PushPolicy::Always) => true,
            (None, PushPolicy::Never) => false,
            (None, PushPolicy::Ask) => {
                let url = get_remote_url(&runner, &remote).unwrap_or_default();
                let prompt = format!(
                    "Push {} to {} ({})? (git push {} {})",
                    target, remote, url, remote, target
                );
                confirm(&prompt, false)?
            }
        };
        if should_push {
            push_target(&runner, &remote, &target, opts.json)?;
        }
    }

    if opts.json {
        println!("{}", summary.to_json()?);
    } else {
        println!();
        Output::success("Done!");
    }
    Ok(ExitCode::SUCCESS)
}

/// Check out the target branch, creating it if the user agrees.
fn switch_to_target(
    runner: &dyn CommandRunner,
    target: &str,
    create: bool,
    json: bool,
) -> anyhow::Result<TargetOutcome> {
    let (result, title) = if branch_exists(runner, target) {
        (checkout_existing(runner, target)?, "Failed to checkout target branch")
    } else {
        let create = create
            || confirm(
                &format!("Branch '{}' does not exist. Create it from current HEAD?", target),
                true,
            )?;
        if !create {
            return Ok(TargetOutcome::Declined);
        }
        (checkout_new(runner, target)?, "Failed to create target branch")
    };

    let stderr = result.stderr.clone();
    if let Err(e) = result.into_result() {
        Output::error(&format!("{}: {}", title, e));
        if let Some(hint) = checkout_hint(target, &stderr) {
            Output::notice(&hint);
        }
        return Ok(TargetOutcome::Failed);
    }
    if !json {
        Output::success(&format!("On branch {}", Output::branch_name(target)));
    }
    Ok(TargetOutcome::Ready)
}

fn push_target(
    runner: &dyn CommandRunner,
    remote: &str,
    branch: &str,
    json: bool,
) -> anyhow::Result<()> {
    let spinner = Output::spinner(&format!("Pushing {} to {}…", branch, remote));
    let outcome = push_with_upstream_retry(runner, remote, branch)?;
    spinner.finish_and_clear();

    let stderr = outcome.last().map(|r| r.stderr.clone()).unwrap_or_default();
    match outcome.into_result() {
        Ok(outcome) => {
            let how = if outcome.set_upstream {
                " (upstream set)"
            } else {
                ""
            };
            if !json {
                Output::success(&format!("Pushed {} to {}{}", branch, remote, how));
            }
        }
        Err(e) => {
            Output::error(&format!("Push failed: {}", e));
            if let Some(hint) = interpret_push_error(&stderr) {
                Output::notice(hint);
            }
        }
    }
    Ok(())
}

/// Early-exit message; stays off stdout when it carries JSON.
fn warn_user(json: bool, message: &str) {
    if json {
        Output::notice(message);
    } else {
        Output::warning(message);
    }
}
