//! Persisted per-watch rule state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The evaluator's memory for one watch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleState {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl RuleState {
    pub fn new(active: bool) -> Self {
        Self {
            active,
            updated_at: None,
        }
    }
}

/// Mapping from watch id to its last evaluated state.
///
/// Keys are not checked against the current watch list; records for removed
/// watches stay until [`StateFile::prune`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateFile {
    entries: BTreeMap<String, RuleState>,
}

impl StateFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, watch_id: &str) -> Option<&RuleState> {
        self.entries.get(watch_id)
    }

    pub fn insert(&mut self, watch_id: impl Into<String>, state: RuleState) {
        self.entries.insert(watch_id.into(), state);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleState)> {
        self.entries.iter()
    }

    /// Ids present in the state but absent from `known_ids`.
    pub fn orphans<'a, I>(&self, known_ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: std::collections::HashSet<&str> = known_ids.into_iter().collect();
        self.entries
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Removes orphaned records and returns their ids in key order.
    pub fn prune<'a, I>(&mut self, known_ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let orphans = self.orphans(known_ids);
        for id in &orphans {
            self.entries.remove(id);
        }
        orphans
    }
}

impl FromIterator<(String, RuleState)> for StateFile {
    fn from_iter<T: IntoIterator<Item = (String, RuleState)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
