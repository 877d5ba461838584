//! Persisted record of the last notified announcement

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The last announcement a notification was sent for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenState {
    pub last_url: String,
    pub last_version: Option<String>,
    pub last_seen_at_utc: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Trait for loading and saving the seen state
#[cfg_attr(test, automock)]
pub trait StateStore: Send + Sync {
    /// Load the stored state
    ///
    /// Returns `None` when nothing is stored or the record cannot be read;
    /// callers treat both the same way.
    fn load(&self) -> Option<SeenState>;

    /// Replace the stored state
    fn save(&self, state: &SeenState) -> Result<(), StateError>;
}

/// State store keeping a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the stored record. Returns whether a record existed.
    pub fn clear(&self) -> Result<bool, StateError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&temp_path);
        })
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Option<SeenState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read state file {}: {}", self.path.display(), e);
                return None;
            }
        };

        serde_json::from_str(&contents)
            .inspect_err(|e| warn!("Ignoring malformed state file {}: {}", self.path.display(), e))
            .ok()
    }

    fn save(&self, state: &SeenState) -> Result<(), StateError> {
        let mut contents = serde_json::to_vec_pretty(state)?;
        contents.push(b'\n');

        self.write_atomically(&contents)
            .map_err(|source| self.io_error(source))?;
        debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}
