use super::types::{EventSummary, RepoState, RepoStats};

/// Compare a fresh snapshot with the previous state.
///
/// A counter only shows up in the summary when it went up; counters that
/// stayed equal or dropped are left at zero and do not set `has_changes`.
pub fn calculate_event_summary(repo: &str, current: &RepoStats, previous: &RepoState) -> EventSummary {
    let mut summary = EventSummary {
        repo: repo.to_string(),
        ..EventSummary::default()
    };

    let counters = [
        (&mut summary.new_stars, current.stars, previous.last_star_count),
        (&mut summary.new_issues, current.issues, previous.last_issue_count),
        (&mut summary.new_prs, current.pull_requests, previous.last_pr_count),
        (&mut summary.new_forks, current.forks, previous.last_fork_count),
    ];

    let mut has_changes = false;
    for (delta, now, before) in counters {
        if now > before {
            *delta = now - before;
            has_changes = true;
        }
    }
    summary.has_changes = has_changes;

    summary
}
