//! File-backed announcement state store.
//!
//! A missing or unreadable state file is treated as the canonical empty
//! state so a corrupt file can never wedge the bot. Writes go through a
//! temp-file rename; invocations are assumed non-overlapping, so no locking.

use anyhow::{Context, Result};
use log::{debug, warn};
use match_core::MatchState;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> MatchState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No readable state file at {}: {e}", self.path.display());
                return MatchState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    "Corrupt state file at {}, starting from empty state: {e}",
                    self.path.display()
                );
                MatchState::default()
            }
        }
    }

    pub fn save(&self, state: &MatchState) -> Result<()> {
        let json = serde_json::to_string(state).context("Failed to serialize state")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write state to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move state into {}", self.path.display()))?;
        Ok(())
    }
}
