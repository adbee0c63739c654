mod config;
mod github;
mod repo;
mod report;
mod state;
mod stats;

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn, Instrument};
use tracing_subscriber::EnvFilter;

use github::HttpGitHubClient;
use report::RepoReport;
use state::StateStore;
use stats::StatsService;

/// Repo Watch — polls GitHub repositories and reports new stars, issues,
/// pull requests and forks since the previous run.
#[derive(Parser, Debug)]
#[command(name = "repo-watch", version, about)]
struct Cli {
    /// Repositories to poll (e.g., owner/repo or https://github.com/owner/repo)
    #[arg(required = true)]
    repos: Vec<String>,

    /// State file holding the previously observed counters
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Optional output file path for markdown report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only check whether each repository exists
    #[arg(long)]
    check: bool,

    /// Compute changes without updating the state file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("parsing repository identifiers");
    let repo_ids = cli
        .repos
        .iter()
        .map(|raw| {
            repo::parse_repo_string(raw).inspect_err(|err| {
                warn!(input = %err.input, kind = ?err.kind, "rejected repository identifier")
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = repo_ids.len(), "parsed repository identifiers");

    info!("loading configuration");
    let config = config::Config::load()?;
    let service = StatsService::new(HttpGitHubClient::new(&config)?);

    if cli.check {
        for id in &repo_ids {
            let exists = service.repo_exists(&id.owner, &id.repo).await?;
            report::print_existence(&id.to_string(), exists);
        }
        return Ok(());
    }

    let state_path = config.state_path(cli.state.as_deref());
    let mut store = StateStore::load(&state_path)?;

    let mut entries = Vec::with_capacity(repo_ids.len());
    for id in &repo_ids {
        let name = id.to_string();
        let key = id.state_key();
        let previous = store.get(&key);

        let (stats, summary) = async {
            info!("fetching repository stats from GitHub");
            let stats = service.get_repo_stats(&id.owner, &id.repo).await?;
            info!(stars = stats.stars, issues = stats.issues, prs = stats.pull_requests, forks = stats.forks, "fetched repository stats");

            let summary = stats::calculate_event_summary(&name, &stats, &previous);
            debug!(has_changes = summary.has_changes, "computed event summary");
            Ok::<_, github::GitHubError>((stats, summary))
        }
        .instrument(info_span!("poll", repo = %name))
        .await?;

        store.update(&key, &stats);
        entries.push(RepoReport { summary, stats });
    }

    let built_report = report::build(entries);
    report::output(&built_report, cli.output.as_deref())?;

    if cli.dry_run {
        info!("dry run, state file left untouched");
    } else {
        store.save()?;
    }
    info!(changed = built_report.changed, has_changes = built_report.has_changes(), "done");

    Ok(())
}
