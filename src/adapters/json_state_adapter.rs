//! JSON file state store.
//!
//! Missing, empty, unreadable or malformed files load as an empty state. Saves serialize
//! the whole mapping in memory, write it to a sibling temp file and rename it
//! over the target so a reader never sees a partial file.

use crate::domain::error::PricewatchError;
use crate::domain::state::StateFile;
use crate::ports::state_port::StatePort;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

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

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn store_error(&self, reason: impl ToString) -> PricewatchError {
        PricewatchError::StateStore {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl StatePort for JsonStateStore {
    async fn load(&self) -> Result<StateFile, PricewatchError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StateFile::new()),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "state file is unreadable, starting fresh"
                );
                return Ok(StateFile::new());
            }
        };

        if raw.trim().is_empty() {
            return Ok(StateFile::new());
        }

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "state file is corrupt, starting fresh"
                );
                Ok(StateFile::new())
            }
        }
    }

    async fn save(&self, state: &StateFile) -> Result<(), PricewatchError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.store_error(e))?;
            }
        }

        let mut body = serde_json::to_string_pretty(state).map_err(|e| self.store_error(e))?;
        body.push('\n');

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| self.store_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.store_error(e))?;
        Ok(())
    }
}
