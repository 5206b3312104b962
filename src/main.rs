//! git-cp CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use git_cp::cli::commands::{run_pick, PickOptions};
use git_cp::cli::Output;
use git_cp::telemetry::{init_telemetry, TelemetryConfig};

#[derive(Parser)]
#[command(name = "git-cp")]
#[command(author, version, about = "Interactive git cherry-pick", long_about = None)]
struct Cli {
    /// Repository to work in
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Source branch (skips the branch prompt)
    #[arg(short, long)]
    source: Option<String>,

    /// Commit hash or prefix to pick; repeat for several (skips the commit prompt)
    #[arg(short, long = "commit", value_name = "HASH")]
    commits: Vec<String>,

    /// Target branch (skips the target prompt)
    #[arg(short, long)]
    target: Option<String>,

    /// Create the target branch without asking if it does not exist
    #[arg(long)]
    create: bool,

    /// Maximum number of commits to list
    #[arg(short = 'n', long, env = "GIT_CP_LIMIT", value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,

    /// Remote to push to
    #[arg(long, env = "GIT_CP_REMOTE")]
    remote: Option<String>,

    /// Push the target branch without asking
    #[arg(long, conflicts_with = "no_push")]
    push: bool,

    /// Never push the target branch
    #[arg(long)]
    no_push: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn pick_options(&self) -> PickOptions {
        let push = match (self.push, self.no_push) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        PickOptions {
            repo: self.repo.clone(),
            source: self.source.clone(),
            commits: self.commits.clone(),
            target: self.target.clone(),
            create: self.create,
            limit: self.limit.map(|n| n as usize),
            remote: self.remote.clone(),
            push,
            json: self.json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "git-cp", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let telemetry = if cli.verbose {
        TelemetryConfig::development()
    } else if cli.json {
        TelemetryConfig::production()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = init_telemetry(&telemetry) {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    match run_pick(&cli.pick_options()) {
        Ok(code) => code,
        Err(e) => {
            Output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
