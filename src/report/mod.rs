pub mod types;

pub use types::{RepoReport, Report};

use crate::stats::EventSummary;
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Build a Report from the per-repository results.
pub fn build(repos: Vec<RepoReport>) -> Report {
    let changed = repos.iter().filter(|r| r.summary.has_changes).count();
    Report { repos, changed }
}

/// Output the report to terminal (default) or to a markdown file.
#[instrument(skip(report), fields(repos = report.repos.len(), changed = report.changed))]
pub fn output(report: &Report, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing report to terminal");
            print_terminal_report(report);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            write_markdown_report(report, path)
        }
    }
}

/// Print the result of an existence probe for one repository.
pub fn print_existence(repo: &str, exists: bool) {
    let status = if exists {
        "exists".green().bold()
    } else {
        "not found".red().bold()
    };
    println!("{}: {}", repo, status);
}

/// Format and print the report to the terminal with colors.
///
/// ═══ owner/repo ═══
/// ★ 120  issues 4  PRs 2  forks 9  (updated 2024-05-01 12:00 UTC)
///   +3 stars
///   +1 issue
fn print_terminal_report(report: &Report) {
    println!();
    for entry in &report.repos {
        let stats = &entry.stats;
        println!("═══ {} ═══{}", entry.summary.repo.bold(), renamed_note(entry));
        println!(
            "★ {}  issues {}  PRs {}  forks {}  (updated {})",
            stats.stars,
            stats.issues,
            stats.pull_requests,
            stats.forks,
            stats.updated_at.format("%Y-%m-%d %H:%M UTC")
        );
        if entry.summary.has_changes {
            for line in change_lines(&entry.summary) {
                println!("  {}", line.green());
            }
        } else {
            println!("  {}", "No changes.".dimmed());
        }
        println!();
    }

    println!(
        "═══ {} of {} repositories changed ═══",
        report.changed,
        report.repos.len()
    );
    println!();
}

/// Write the report as a markdown file.
fn write_markdown_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let mut md = String::from("# Repository activity\n\n");

    for entry in &report.repos {
        let stats = &entry.stats;
        md.push_str(&format!("## {}{}\n\n", entry.summary.repo, renamed_note(entry)));
        md.push_str(&format!(
            "**Stars:** {} | **Issues:** {} | **PRs:** {} | **Forks:** {}\n\n",
            stats.stars, stats.issues, stats.pull_requests, stats.forks
        ));
        if entry.summary.has_changes {
            for line in change_lines(&entry.summary) {
                md.push_str(&format!("- {}\n", line));
            }
            md.push('\n');
        } else {
            md.push_str("No changes.\n\n");
        }
    }

    md.push_str(&format!(
        "**{} of {} repositories changed**\n",
        report.changed,
        report.repos.len()
    ));

    std::fs::write(path, md)?;
    Ok(())
}

/// GitHub follows renames and transfers, so the fetched owner/name can
/// differ from what was asked for.
fn renamed_note(entry: &RepoReport) -> String {
    let canonical = format!("{}/{}", entry.stats.owner, entry.stats.name);
    if canonical.eq_ignore_ascii_case(&entry.summary.repo) {
        String::new()
    } else {
        format!(" (now {})", canonical)
    }
}

/// Human-readable lines for the counters that increased.
fn change_lines(summary: &EventSummary) -> Vec<String> {
    [
        (summary.new_stars, "star", "stars"),
        (summary.new_issues, "issue", "issues"),
        (summary.new_prs, "pull request", "pull requests"),
        (summary.new_forks, "fork", "forks"),
    ]
    .into_iter()
    .filter(|(count, _, _)| *count > 0)
    .map(|(count, one, many)| format!("+{} {}", count, if count == 1 { one } else { many }))
    .collect()
}
