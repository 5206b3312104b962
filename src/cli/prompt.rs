//! Interactive prompts
//!
//! Thin wrappers over `dialoguer`, plus the terminal [`Resolver`] that the
//! cherry-pick session consults on failures and conflicts.

use std::io;

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select};

use crate::cli::output::{truncate, Output};
use crate::core::commit::Commit;
use crate::core::session::{
    ConflictChoice, ConflictView, FailureChoice, Resolver, SessionEvent,
};
use crate::git::branch::validate_branch_name;
use crate::git::CommandResult;

const SKIP_COMMIT: &str = "Skip this commit";
const ABORT_ALL: &str = "Abort all";
const FIXED_MANUALLY: &str = "I fixed it manually — stage & continue";
const ABORT_REMAINING: &str = "Abort all remaining cherry-picks";
const DONE_VIEWING: &str = "Done viewing diffs";

fn to_io(e: dialoguer::Error) -> io::Error {
    match e {
        dialoguer::Error::IO(e) => e,
    }
}

/// Pick the source branch, with type-to-search.
pub fn select_source_branch(branches: &[String]) -> io::Result<String> {
    let idx = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick the source branch to cherry-pick from")
        .items(branches)
        .default(0)
        .max_length(12)
        .interact()
        .map_err(to_io)?;
    Ok(branches[idx].clone())
}

/// Multi-select commits. Returned in list order (newest first).
pub fn select_commits(commits: &[Commit]) -> io::Result<Vec<Commit>> {
    let labels: Vec<String> = commits.iter().map(Output::commit_label).collect();
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select commits to cherry-pick (Space = toggle, Enter = confirm)")
        .items(&labels)
        .max_length(15)
        .interact()
        .map_err(to_io)?;
    // dialoguer returns indices in ascending order
    Ok(picked.into_iter().map(|i| commits[i].clone()).collect())
}

/// Ask for the target branch name until it validates.
pub fn input_target_branch() -> io::Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the target branch name")
        .validate_with(|name: &String| -> Result<(), String> {
            validate_branch_name(name).map_err(|e| match e {
                crate::git::GitError::InvalidBranchName(reason) => reason,
                other => other.to_string(),
            })
        })
        .interact_text()
        .map_err(to_io)
}

/// Yes/no confirmation.
pub fn confirm(prompt: &str, default: bool) -> io::Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(to_io)
}

/// Terminal-backed [`Resolver`]: renders events and asks the user.
///
/// Prompts always go to stderr. In quiet mode progress stays off stdout too,
/// and only failures are reported.
pub struct PromptResolver {
    theme: ColorfulTheme,
    quiet: bool,
}

impl PromptResolver {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            quiet: false,
        }
    }

    /// Report failures on stderr only, for runs whose stdout is JSON.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    fn select(&self, prompt: &str, items: &[&str]) -> io::Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(to_io)
    }

    fn conflict_choice(&self) -> io::Result<ConflictChoice> {
        let idx = self.select(
            "How do you want to resolve the conflict?",
            &[FIXED_MANUALLY, SKIP_COMMIT, ABORT_REMAINING],
        )?;
        Ok(match idx {
            0 => ConflictChoice::FixedManually,
            1 => ConflictChoice::Skip,
            _ => ConflictChoice::AbortAll,
        })
    }

    fn view_diffs(&self, conflict: &ConflictView<'_>) -> io::Result<()> {
        let mut options: Vec<String> = conflict
            .files()
            .iter()
            .map(|f| format!("View: {}", f))
            .collect();
        options.push(DONE_VIEWING.to_string());
        let done = options.len() - 1;

        loop {
            let idx = Select::with_theme(&self.theme)
                .with_prompt("Show conflict diff for a file?")
                .items(&options)
                .default(done)
                .interact()
                .map_err(to_io)?;
            if idx == done {
                return Ok(());
            }
            let path = &conflict.files()[idx];
            Output::rule(&path.yellow().to_string());
            Output::diff(&conflict.diff(path));
        }
    }
}

impl Default for PromptResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for PromptResolver {
    fn on_event(&mut self, event: &SessionEvent) {
        if self.quiet {
            match event {
                SessionEvent::ContinueFailed { result, .. } => {
                    Output::command_failure("Continue failed", result)
                }
                SessionEvent::Skipped { result, commit } if !result.success => {
                    Output::command_failure(&format!("Skipping {} failed", commit.short_hash), result)
                }
                SessionEvent::Aborted { result, .. } if !result.success => {
                    Output::command_failure("Abort failed", result)
                }
                _ => {}
            }
            return;
        }
        match event {
            SessionEvent::Started {
                commit,
                index,
                total,
            } => {
                println!();
                Output::rule(&format!(
                    "[{}/{}] Cherry-picking {} — {}",
                    index,
                    total,
                    Output::hash(&commit.short_hash),
                    truncate(&commit.subject, 70)
                ));
            }
            SessionEvent::Applied { commit } => {
                Output::success(&format!("Applied {}", Output::hash(&commit.short_hash)));
            }
            SessionEvent::ContinueFailed { stage, result, .. } => {
                if !stage.success {
                    Output::command_failure("Staging failed", stage);
                }
                Output::command_failure("Continue failed", result);
                Output::warning("You may need to resolve more conflicts.");
            }
            SessionEvent::Skipped { commit, result } => {
                if result.success {
                    Output::warning(&format!("Skipped {}", Output::hash(&commit.short_hash)));
                } else {
                    Output::command_failure(
                        &format!("Skipping {} failed", commit.short_hash),
                        result,
                    );
                }
            }
            SessionEvent::Aborted { result, .. } => {
                if result.success {
                    Output::error("Aborted. Returning to original state.");
                } else {
                    Output::command_failure("Abort failed", result);
                }
            }
            SessionEvent::Completed { .. } => {}
        }
    }

    fn on_failure(&mut self, commit: &Commit, result: &CommandResult) -> io::Result<FailureChoice> {
        Output::command_failure(
            &format!("Cherry-pick failed for {}", commit.short_hash),
            result,
        );
        let idx = self.select("What do you want to do?", &[SKIP_COMMIT, ABORT_ALL])?;
        Ok(if idx == 0 {
            FailureChoice::Skip
        } else {
            FailureChoice::AbortAll
        })
    }

    fn on_conflict(
        &mut self,
        commit: &Commit,
        conflict: &ConflictView<'_>,
    ) -> io::Result<ConflictChoice> {
        if self.quiet {
            Output::error(&format!(
                "Conflicts detected in {}: {}",
                commit.short_hash,
                conflict.files().join(", ")
            ));
            return self.conflict_choice();
        }

        println!();
        Output::error(&format!(
            "Conflicts detected in {} — {}",
            commit.short_hash.bold(),
            commit.subject
        ));
        Output::header("Conflicted files");
        for f in conflict.files() {
            Output::list_item(&f.red().to_string());
        }
        println!();

        self.view_diffs(conflict)?;
        self.conflict_choice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_resolver() {
        assert!(!PromptResolver::new().quiet);
        assert!(PromptResolver::quiet().quiet);
    }

    #[test]
    fn test_quiet_progress_events_are_silent() {
        let commit = Commit {
            hash: "abc".to_string(),
            short_hash: "abc".to_string(),
            author: "Ann".to_string(),
            date: "2024-01-01".to_string(),
            subject: "subject".to_string(),
        };
        let mut resolver = PromptResolver::quiet();
        resolver.on_event(&SessionEvent::Started {
            commit: commit.clone(),
            index: 1,
            total: 1,
        });
        resolver.on_event(&SessionEvent::Applied { commit });
        resolver.on_event(&SessionEvent::Completed {
            applied: 1,
            skipped: 0,
        });
    }
}
