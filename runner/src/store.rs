use anyhow::{Context, Result};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use common::ScoreStore;

// ============================================================================
// Best Score File
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFileContents {
    best_score: u32,
}

// Best score kept in a small JSON file. A missing or unreadable file reads
// as "no score yet"; failed writes are logged and otherwise ignored.
#[derive(Resource, Debug)]
pub struct JsonScoreFile {
    path: PathBuf,
    cached: Option<u32>,
}

impl JsonScoreFile {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match read_best_score(&path) {
            Ok(score) => score,
            Err(e) => {
                warn!("ignoring score file {}: {:#}", path.display(), e);
                None
            }
        };
        debug!(path = %path.display(), ?cached, "score file opened");
        Self { path, cached }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreFile {
    fn get(&self) -> Option<u32> {
        self.cached
    }

    fn set(&mut self, value: u32) {
        self.cached = Some(value);
        if let Err(e) = write_best_score(&self.path, value) {
            warn!("failed to save best score to {}: {:#}", self.path.display(), e);
        }
    }
}

fn read_best_score(path: &Path) -> Result<Option<u32>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let contents: ScoreFileContents =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(contents.best_score))
}

fn write_best_score(path: &Path, best_score: u32) -> Result<()> {
    let text = serde_json::to_string_pretty(&ScoreFileContents { best_score })?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
