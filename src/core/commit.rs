//! Commit records parsed from `git log`

use serde::Serialize;
use std::fmt;

/// Field delimiter used in [`LOG_FORMAT`]
pub const FIELD_DELIMITER: char = '|';

/// `git log --pretty` format: full hash, short hash, author, date, subject.
///
/// Paired with `--date=short` so the date has calendar-day precision.
pub const LOG_FORMAT: &str = "--pretty=format:%H|%h|%an|%ad|%s";

/// A single commit as listed from a branch. Identity is the full hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Commit {
    pub hash: String,
    pub short_hash: String,
    pub author: String,
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    pub subject: String,
}

impl Commit {
    /// Parse one line of [`LOG_FORMAT`] output.
    ///
    /// Splits on the first four delimiters only, so the subject may itself
    /// contain the delimiter. Returns `None` for lines with fewer than five
    /// fields.
    pub fn parse_log_line(line: &str) -> Option<Self> {
        let mut parts = line.splitn(5, FIELD_DELIMITER);
        let hash = parts.next()?;
        let short_hash = parts.next()?;
        let author = parts.next()?;
        let date = parts.next()?;
        let subject = parts.next()?;
        Some(Self {
            hash: hash.to_string(),
            short_hash: short_hash.to_string(),
            author: author.to_string(),
            date: date.to_string(),
            subject: subject.to_string(),
        })
    }

    /// Whether `prefix` names this commit (full or abbreviated hash).
    pub fn matches_hash(&self, prefix: &str) -> bool {
        let prefix = prefix.trim();
        !prefix.is_empty() && (self.hash.starts_with(prefix) || self.short_hash == prefix)
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:<20} {}",
            self.short_hash, self.date, self.author, self.subject
        )
    }
}

/// Parse full `git log` output, newest-first as git emits it.
///
/// Blank and malformed lines are dropped individually.
pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(Commit::parse_log_line)
        .collect()
}
