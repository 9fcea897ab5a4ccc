use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{store::RosterStore, CachedRoster};

/// Keeps the roster snapshot as a single JSON document on disk
#[derive(Debug, Clone)]
pub struct FileRosterStore {
    path: PathBuf,
}

impl FileRosterStore {
    pub const DEFAULT_FILE_NAME: &str = "nba_players_cache.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileRosterStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE_NAME)
    }
}

impl RosterStore for FileRosterStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> anyhow::Result<Option<CachedRoster>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read roster cache {}", self.path.display())
                })
            }
        };

        // a corrupt cache is not fatal, the caller will go to the API instead
        match serde_json::from_str::<CachedRoster>(&content) {
            Ok(roster) => {
                tracing::debug!(players = roster.players.len(), "Loaded roster cache");
                Ok(Some(roster))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode roster cache, ignoring it");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip_all, fields(path = %self.path.display(), players = roster.players.len()))]
    async fn save(&self, roster: &CachedRoster) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string(roster).context("Failed to encode roster cache")?;

        tokio::fs::write(&self.path, json)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to write roster cache"))
            .with_context(|| format!("Failed to write roster cache {}", self.path.display()))?;

        Ok(())
    }
}
