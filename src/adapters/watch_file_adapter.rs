//! JSON watch list loader.

use crate::domain::error::PricewatchError;
use crate::domain::watch::{self, WatchConfig};
use std::fs;
use std::path::Path;

/// Reads and validates the watch list. Every failure here is fatal to a run.
pub fn load_watches(path: &Path) -> Result<Vec<WatchConfig>, PricewatchError> {
    let file = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|e| PricewatchError::WatchList {
        file: file.clone(),
        reason: if e.kind() == std::io::ErrorKind::NotFound {
            "file not found".to_string()
        } else {
            e.to_string()
        },
    })?;

    parse_watches(&raw).map_err(|e| match e {
        PricewatchError::WatchList { reason, .. } => PricewatchError::WatchList { file, reason },
        other => other,
    })
}

pub fn parse_watches(raw: &str) -> Result<Vec<WatchConfig>, PricewatchError> {
    let watches: Vec<WatchConfig> =
        serde_json::from_str(raw).map_err(|e| PricewatchError::WatchList {
            file: String::new(),
            reason: e.to_string(),
        })?;
    watch::validate_watches(&watches)?;
    Ok(watches)
}
