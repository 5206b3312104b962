//! Commit application order

use super::commit::Commit;

/// Turn a newest-first selection into oldest-first application order.
///
/// Stable and non-deduplicating: repeated commits stay repeated.
pub fn application_order(selection: &[Commit]) -> Vec<Commit> {
    selection.iter().rev().cloned().collect()
}

/// Pick `hashes` out of a newest-first commit list, keeping list order.
///
/// Each commit appears once even if several prefixes name it. Returns the
/// prefixes that matched nothing as the error.
pub fn select_by_hash(commits: &[Commit], hashes: &[String]) -> Result<Vec<Commit>, Vec<String>> {
    let unmatched: Vec<String> = hashes
        .iter()
        .filter(|h| !commits.iter().any(|c| c.matches_hash(h)))
        .cloned()
        .collect();
    if !unmatched.is_empty() {
        return Err(unmatched);
    }
    Ok(commits
        .iter()
        .filter(|c| hashes.iter().any(|h| c.matches_hash(h)))
        .cloned()
        .collect())
}
