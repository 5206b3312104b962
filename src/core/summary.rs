//! Final outcome summary

use serde::Serialize;

use super::session::SessionReport;

/// What a run achieved, derived from the session counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub applied: usize,
    pub skipped: usize,
    pub total_selected: usize,
    pub target_branch: String,
    pub aborted: bool,
}

impl Summary {
    pub fn new(report: &SessionReport, target_branch: &str) -> Self {
        Self {
            applied: report.applied,
            skipped: report.skipped,
            total_selected: report.total,
            target_branch: target_branch.to_string(),
            aborted: report.aborted,
        }
    }

    /// Commits that were neither applied nor skipped
    pub fn unresolved(&self) -> usize {
        self.total_selected - self.applied - self.skipped
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
