#![allow(dead_code)]

use async_trait::async_trait;
use pricewatch::domain::error::PricewatchError;
use pricewatch::domain::rule::RuleSpec;
use pricewatch::domain::rule_eval::SaleEvent;
use pricewatch::domain::snapshot::Snapshot;
use pricewatch::domain::state::{RuleState, StateFile};
use pricewatch::domain::watch::WatchConfig;
use pricewatch::ports::notifier_port::NotifierPort;
use pricewatch::ports::provider_port::PriceProvider;
use pricewatch::ports::state_port::StatePort;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Provider that answers from a table keyed by the watch config's `sku`.
pub struct MockProvider {
    pub name: String,
    pub snapshots: HashMap<String, Snapshot>,
    pub errors: HashMap<String, String>,
    pub fetches: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            snapshots: HashMap::new(),
            errors: HashMap::new(),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_price(mut self, sku: &str, current: f64, list: f64) -> Self {
        self.snapshots
            .insert(sku.to_string(), Snapshot::new(current, list).with_currency("USD"));
        self
    }

    pub fn with_snapshot(mut self, sku: &str, snapshot: Snapshot) -> Self {
        self.snapshots.insert(sku.to_string(), snapshot);
        self
    }

    pub fn with_error(mut self, sku: &str, reason: &str) -> Self {
        self.errors.insert(sku.to_string(), reason.to_string());
        self
    }
}

#[async_trait]
impl PriceProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, config: &Map<String, Value>) -> Result<Snapshot, PricewatchError> {
        let sku = config
            .get("sku")
            .and_then(Value::as_str)
            .ok_or_else(|| PricewatchError::ProviderConfig {
                provider: self.name.clone(),
                reason: "missing field `sku`".into(),
            })?
            .to_string();
        self.fetches.lock().unwrap().push(sku.clone());

        if let Some(reason) = self.errors.get(&sku) {
            return Err(PricewatchError::Network {
                url: format!("mock://{}", sku),
                reason: reason.clone(),
            });
        }
        self.snapshots
            .get(&sku)
            .cloned()
            .ok_or_else(|| PricewatchError::Http {
                status: 404,
                url: format!("mock://{}", sku),
                snippet: None,
            })
    }
}

/// Forwards to a shared [`MockProvider`] so tests can inspect fetches after a run.
pub struct SharedProvider(pub std::sync::Arc<MockProvider>);

#[async_trait]
impl PriceProvider for SharedProvider {
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn fetch(&self, config: &Map<String, Value>) -> Result<Snapshot, PricewatchError> {
        self.0.fetch(config).await
    }
}

/// In-memory state store that counts saves.
#[derive(Default)]
pub struct MemoryStateStore {
    pub state: Mutex<StateFile>,
    pub saves: AtomicUsize,
    pub fail_save: bool,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StateFile) -> Self {
        Self {
            state: Mutex::new(state),
            ..Self::default()
        }
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> StateFile {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatePort for MemoryStateStore {
    async fn load(&self) -> Result<StateFile, PricewatchError> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save(&self, state: &StateFile) -> Result<(), PricewatchError> {
        if self.fail_save {
            return Err(PricewatchError::StateStore {
                path: "memory".into(),
                reason: "disk full".into(),
            });
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = state.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<SaleEvent>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<SaleEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierPort for RecordingNotifier {
    async fn notify(&self, event: &SaleEvent) -> Result<(), PricewatchError> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            return Err(PricewatchError::Notify {
                reason: "channel closed".into(),
            });
        }
        Ok(())
    }
}

pub fn watch(id: &str, provider: &str, sku: &str) -> WatchConfig {
    let mut config = Map::new();
    config.insert("sku".to_string(), Value::String(sku.to_string()));
    WatchConfig {
        id: id.to_string(),
        provider: provider.to_string(),
        config,
        rule: None,
    }
}

pub fn watch_with_rule(id: &str, sku: &str, rule_type: &str, value: Option<f64>) -> WatchConfig {
    WatchConfig {
        rule: Some(RuleSpec {
            rule_type: rule_type.to_string(),
            value,
        }),
        ..watch(id, "mock", sku)
    }
}

pub fn state_of(entries: &[(&str, bool)]) -> StateFile {
    entries
        .iter()
        .map(|(id, active)| (id.to_string(), RuleState::new(*active)))
        .collect()
}
