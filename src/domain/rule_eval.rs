//! Rule evaluation engine.
//!
//! Pure state transition: given a rule, a fresh snapshot and the previously
//! persisted state, produce the next state and at most one transition event.
//!
//! # Transition table
//!
//! | prev  | now   | event          |
//! |-------|-------|----------------|
//! | false | false | none           |
//! | false | true  | `SaleStarted`  |
//! | true  | true  | none           |
//! | true  | false | `SaleEnded`    |
//!
//! A watch without prior state is treated as `prev = false`.

use crate::domain::error::PricewatchError;
use crate::domain::rule::Rule;
use crate::domain::snapshot::Snapshot;
use crate::domain::state::RuleState;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleEventKind {
    SaleStarted,
    SaleEnded,
}

impl SaleEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SaleEventKind::SaleStarted => "SALE_STARTED",
            SaleEventKind::SaleEnded => "SALE_ENDED",
        }
    }
}

/// A transition signal. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleEvent {
    pub kind: SaleEventKind,
    pub watch_id: String,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub next_state: RuleState,
    pub events: Vec<SaleEvent>,
}

impl Evaluation {
    /// Whether `active` differs from the prior state (cold start counts as `false`).
    pub fn changed(&self, prev: Option<&RuleState>) -> bool {
        self.next_state.active != prev.is_some_and(|p| p.active)
    }
}

/// Whether the snapshot satisfies the rule.
///
/// Errors when the rule has no evaluator or the snapshot lacks a price.
pub fn is_active(watch_id: &str, rule: &Rule, snapshot: &Snapshot) -> Result<bool, PricewatchError> {
    match rule {
        Rule::AnySale => {
            let (current, list) =
                snapshot
                    .prices()
                    .map_err(|missing| PricewatchError::IndeterminateSnapshot {
                        watch_id: watch_id.to_string(),
                        missing: missing.to_string(),
                    })?;
            if !current.is_finite() || !list.is_finite() {
                return Err(PricewatchError::IndeterminateSnapshot {
                    watch_id: watch_id.to_string(),
                    missing: "a comparable price".to_string(),
                });
            }
            Ok(current < list)
        }
        Rule::BelowPrice(_) => Err(PricewatchError::RuleNotImplemented {
            rule: rule.to_string(),
        }),
    }
}

/// Evaluates `rule` against `snapshot` and diffs the result with `prev`.
///
/// `now` overrides the timestamp stamped on the next state; it defaults to
/// the wall clock.
pub fn evaluate(
    watch_id: &str,
    rule: &Rule,
    snapshot: &Snapshot,
    prev: Option<&RuleState>,
    now: Option<DateTime<Utc>>,
) -> Result<Evaluation, PricewatchError> {
    let active = is_active(watch_id, rule, snapshot)?;
    let prev_active = prev.is_some_and(|p| p.active);

    let kind = match (prev_active, active) {
        (false, true) => Some(SaleEventKind::SaleStarted),
        (true, false) => Some(SaleEventKind::SaleEnded),
        _ => None,
    };

    let events = kind
        .map(|kind| SaleEvent {
            kind,
            watch_id: watch_id.to_string(),
            snapshot: snapshot.clone(),
        })
        .into_iter()
        .collect();

    let now = now.unwrap_or_else(Utc::now);
    Ok(Evaluation {
        next_state: RuleState {
            active,
            updated_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        },
        events,
    })
}
