use crate::stats::{EventSummary, RepoStats};

/// One polled repository: the fresh snapshot and what changed since last time.
#[derive(Debug, Clone)]
pub struct RepoReport {
    pub summary: EventSummary,
    pub stats: RepoStats,
}

/// Complete report across all polled repositories.
#[derive(Debug)]
pub struct Report {
    /// Per-repository results, in the order they were polled
    pub repos: Vec<RepoReport>,
    /// Number of repositories with at least one increased counter
    pub changed: usize,
}

impl Report {
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }
}
