//! Price provider port.

use crate::domain::error::PricewatchError;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A retail source able to produce a [`Snapshot`] for a watch.
///
/// `config` is the watch's provider-specific blob; malformed config must be
/// reported as [`PricewatchError::ProviderConfig`] before any request is made.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, config: &Map<String, Value>) -> Result<Snapshot, PricewatchError>;
}
