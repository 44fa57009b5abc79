//! Configured watches.

use crate::domain::error::PricewatchError;
use crate::domain::rule::RuleSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One user-configured price watch. Read-only to the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    pub id: String,
    pub provider: String,
    /// Provider-specific settings, validated by the provider itself.
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleSpec>,
}

/// Checks that every id is non-empty and unique.
pub fn validate_watches(watches: &[WatchConfig]) -> Result<(), PricewatchError> {
    let mut seen = HashSet::new();
    for watch in watches {
        if watch.id.trim().is_empty() {
            return Err(PricewatchError::WatchList {
                file: String::new(),
                reason: format!("watch with provider '{}' has an empty id", watch.provider),
            });
        }
        if !seen.insert(watch.id.as_str()) {
            return Err(PricewatchError::DuplicateWatchId {
                id: watch.id.clone(),
            });
        }
    }
    Ok(())
}

/// Applies the optional single-watch filter, preserving input order.
pub fn select<'a>(watches: &'a [WatchConfig], id: Option<&str>) -> Vec<&'a WatchConfig> {
    match id {
        Some(id) => watches.iter().filter(|w| w.id == id).collect(),
        None => watches.iter().collect(),
    }
}

/// Renders a provider config value for display, without JSON quoting for strings.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
