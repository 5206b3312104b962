//! CLI output formatting
//!
//! Provides colored output, spinners, and formatting utilities.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::commit::Commit;
use crate::core::summary::Summary;
use crate::git::CommandResult;

/// Output helper for consistent CLI formatting
pub struct Output;

impl Output {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print a warning to stderr, keeping stdout for machine-readable output
    pub fn notice(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!("\n{}", message.bold());
    }

    /// Print a horizontal rule with a title
    pub fn rule(title: &str) {
        println!("{} {}", "──".dimmed(), title);
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", key.dimmed(), value);
    }

    /// Print a list item
    pub fn list_item(item: &str) {
        println!("  • {}", item);
    }

    /// Print a failed command's full output under a title
    pub fn command_failure(title: &str, result: &CommandResult) {
        eprintln!("{} {}", "✗".red(), title.red().bold());
        let output = result.combined_output();
        let output = output.trim();
        if output.is_empty() {
            eprintln!("    {}", format!("(exit code {})", result.exit_code).dimmed());
        }
        for line in output.lines() {
            eprintln!("    {}", line.red());
        }
    }

    /// Print diff text colored line by line
    pub fn diff(diff: &str) {
        if diff.trim().is_empty() {
            println!("{}", "(empty diff)".dimmed());
            return;
        }
        for line in diff.lines() {
            if line.starts_with('+') {
                println!("{}", line.green());
            } else if line.starts_with('-') {
                println!("{}", line.red());
            } else if line.starts_with('@') {
                println!("{}", line.blue());
            } else {
                println!("{}", line);
            }
        }
    }

    /// Create a spinner with a message
    pub fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded template must be valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Format a short hash consistently
    pub fn hash(short_hash: &str) -> String {
        short_hash.cyan().to_string()
    }

    /// Format a branch name consistently
    pub fn branch_name(name: &str) -> String {
        name.magenta().bold().to_string()
    }

    /// One-line commit label used in prompts
    pub fn commit_label(commit: &Commit) -> String {
        format!(
            "{} {} {:<18} {}",
            Self::hash(&commit.short_hash),
            commit.date.dimmed(),
            truncate(&commit.author, 18),
            truncate(&commit.subject, 55)
        )
    }

    /// Print the commit list as a table
    pub fn commit_table(commits: &[Commit]) {
        let mut table = Table::new(vec!["Hash", "Date", "Author", "Message"]);
        for c in commits {
            let author = truncate(&c.author, 20);
            let subject = truncate(&c.subject, 70);
            table.add_row(vec![&c.short_hash, &c.date, &author, &subject]);
        }
        table.print();
    }

    /// Print the final summary table
    pub fn summary(summary: &Summary) {
        Self::header("Summary");
        let applied = summary.applied.to_string();
        let skipped = summary.skipped.to_string();
        let total = summary.total_selected.to_string();
        let mut table = Table::new(vec!["Result", "Count"]);
        table.add_row(vec!["Applied", &applied]);
        table.add_row(vec!["Skipped", &skipped]);
        table.add_row(vec!["Total selected", &total]);
        table.print();
        println!();
        Self::kv("Branch", &Self::branch_name(&summary.target_branch));
        if summary.aborted {
            Self::warning("Cherry-pick sequence was aborted.");
        } else if summary.unresolved() > 0 {
            Self::warning(&format!(
                "{} commit(s) were left unresolved.",
                summary.unresolved()
            ));
        }
    }
}

/// Shorten `text` to `max` characters, appending an ellipsis if cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}…", cut)
    }
}

/// Table builder for formatted output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with headers
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| h.chars().count()).collect();
        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row.into_iter().map(|s| s.to_string()).collect();
        for (i, cell) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(cell.chars().count());
            }
        }
        self.rows.push(row);
    }

    /// Render the table to a string without colors
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(self.header_line().trim_end());
        out.push('\n');
        out.push_str(&self.separator_line());
        out.push('\n');
        for row in &self.rows {
            out.push_str(self.row_line(row).trim_end());
            out.push('\n');
        }
        out
    }

    /// Print the table
    pub fn print(&self) {
        println!("{}", self.header_line().trim_end().bold());
        println!("{}", self.separator_line().dimmed());
        for row in &self.rows {
            println!("{}", self.row_line(row).trim_end());
        }
    }

    fn header_line(&self) -> String {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = self.column_widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn separator_line(&self) -> String {
        self.column_widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn row_line(&self, row: &[String]) -> String {
        row.iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = self.column_widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
