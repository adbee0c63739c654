use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::stats::{RepoState, RepoStats};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Last observed counters per repository, kept in a JSON file keyed by
/// `owner/repo`.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    repos: BTreeMap<String, RepoState>,
}

impl StateStore {
    /// Load the store from `path`. A missing file yields an empty store.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<StateStore, StateError> {
        if !path.exists() {
            debug!("no state file yet, starting empty");
            return Ok(StateStore {
                path: path.to_path_buf(),
                repos: BTreeMap::new(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let repos: BTreeMap<String, RepoState> =
            serde_json::from_str(&contents).map_err(|source| StateError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(repos = repos.len(), "loaded state");

        Ok(StateStore {
            path: path.to_path_buf(),
            repos,
        })
    }

    /// Previous counters for `repo`, or the zero baseline if never seen.
    pub fn get(&self, repo: &str) -> RepoState {
        self.repos.get(repo).copied().unwrap_or_default()
    }

    pub fn update(&mut self, repo: &str, stats: &RepoStats) {
        self.repos.insert(repo.to_string(), RepoState::from(stats));
    }

    #[instrument(skip(self), fields(path = %self.path.display(), repos = self.repos.len()))]
    pub fn save(&self) -> Result<(), StateError> {
        let io_err = |source: std::io::Error| StateError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.repos).map_err(|source| StateError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)?;
        debug!("state saved");
        Ok(())
    }
}
