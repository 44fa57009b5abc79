//! Run orchestration: fetch, evaluate, accumulate, persist, notify.
//!
//! Watches are processed strictly in input order, one at a time. A failure
//! for one watch is recorded in the report and never aborts the batch; only
//! loading or saving the state file is fatal. The state file is written at
//! most once, and only when some watch's `active` flag changed.

use crate::domain::error::PricewatchError;
use crate::domain::registry::ProviderRegistry;
use crate::domain::rule::Rule;
use crate::domain::rule_eval::{self, Evaluation, SaleEvent};
use crate::domain::snapshot::Snapshot;
use crate::domain::state::{RuleState, StateFile};
use crate::domain::watch::{self, WatchConfig};
use crate::ports::notifier_port::NotifierPort;
use crate::ports::state_port::StatePort;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Process only the watch with this id.
    pub only_id: Option<String>,
    /// Timestamp stamped on changed states; wall clock when `None`.
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum WatchOutcome {
    Checked {
        watch_id: String,
        provider: String,
        on_sale: bool,
        snapshot: Snapshot,
        events: Vec<SaleEvent>,
    },
    Failed {
        watch_id: String,
        provider: String,
        error: PricewatchError,
    },
}

impl WatchOutcome {
    pub fn watch_id(&self) -> &str {
        match self {
            WatchOutcome::Checked { watch_id, .. } | WatchOutcome::Failed { watch_id, .. } => {
                watch_id
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<WatchOutcome>,
    pub state_saved: bool,
    /// Set when the single-watch filter matched nothing.
    pub unmatched_id: Option<String>,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, WatchOutcome::Failed { .. }))
            .count()
    }

    pub fn events(&self) -> impl Iterator<Item = &SaleEvent> {
        self.outcomes.iter().flat_map(|o| match o {
            WatchOutcome::Checked { events, .. } => events.as_slice(),
            WatchOutcome::Failed { .. } => &[][..],
        })
    }
}

pub struct Orchestrator<'a> {
    registry: &'a ProviderRegistry,
    store: &'a dyn StatePort,
    notifier: &'a dyn NotifierPort,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        registry: &'a ProviderRegistry,
        store: &'a dyn StatePort,
        notifier: &'a dyn NotifierPort,
    ) -> Self {
        Self {
            registry,
            store,
            notifier,
        }
    }

    pub async fn run(
        &self,
        watches: &[WatchConfig],
        options: &RunOptions,
    ) -> Result<RunReport, PricewatchError> {
        let selected = watch::select(watches, options.only_id.as_deref());
        if let Some(id) = &options.only_id {
            if selected.is_empty() {
                tracing::warn!(watch_id = %id, "no watch found with requested id");
                return Ok(RunReport {
                    unmatched_id: Some(id.clone()),
                    ..RunReport::default()
                });
            }
        }

        let mut state = self.store.load().await?;
        let mut dirty = false;
        let mut report = RunReport::default();

        for watch in selected {
            let outcome = match self.check(watch, &mut state, &mut dirty, options.now).await {
                Ok((snapshot, evaluation)) => {
                    for event in &evaluation.events {
                        self.dispatch(event).await;
                    }
                    WatchOutcome::Checked {
                        watch_id: watch.id.clone(),
                        provider: watch.provider.clone(),
                        on_sale: evaluation.next_state.active,
                        snapshot,
                        events: evaluation.events,
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        watch_id = %watch.id,
                        provider = %watch.provider,
                        error = %error,
                        "watch check failed"
                    );
                    if let Some(body) = error.response_snippet() {
                        tracing::debug!(watch_id = %watch.id, body, "response body");
                    }
                    WatchOutcome::Failed {
                        watch_id: watch.id.clone(),
                        provider: watch.provider.clone(),
                        error,
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        if dirty {
            self.store.save(&state).await?;
            report.state_saved = true;
            tracing::debug!(entries = state.len(), "state saved");
        } else {
            tracing::debug!("no state changes, skipping save");
        }

        Ok(report)
    }

    async fn check(
        &self,
        watch: &WatchConfig,
        state: &mut StateFile,
        dirty: &mut bool,
        now: Option<DateTime<Utc>>,
    ) -> Result<(Snapshot, Evaluation), PricewatchError> {
        let provider = self.registry.get(&watch.provider)?;
        let rule = Rule::resolve(watch.rule.as_ref())?;

        tracing::debug!(watch_id = %watch.id, provider = %watch.provider, "fetching");
        let snapshot = provider.fetch(&watch.config).await?;

        let prev: Option<&RuleState> = state.get(&watch.id);
        let evaluation = rule_eval::evaluate(&watch.id, &rule, &snapshot, prev, now)?;

        if evaluation.changed(prev) {
            state.insert(watch.id.clone(), evaluation.next_state.clone());
            *dirty = true;
        }

        tracing::info!(
            watch_id = %watch.id,
            provider = %watch.provider,
            on_sale = evaluation.next_state.active,
            "checked"
        );
        Ok((snapshot, evaluation))
    }

    async fn dispatch(&self, event: &SaleEvent) {
        tracing::info!(watch_id = %event.watch_id, kind = event.kind.as_str(), "transition");
        if let Err(e) = self.notifier.notify(event).await {
            tracing::warn!(watch_id = %event.watch_id, error = %e, "notifier failed");
        }
    }
}
