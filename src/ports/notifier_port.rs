//! Transition event sink.

use crate::domain::error::PricewatchError;
use crate::domain::rule_eval::SaleEvent;
use async_trait::async_trait;

#[async_trait]
pub trait NotifierPort: Send + Sync {
    async fn notify(&self, event: &SaleEvent) -> Result<(), PricewatchError>;
}

/// Default sink: accepts every event and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl NotifierPort for NoopNotifier {
    async fn notify(&self, _event: &SaleEvent) -> Result<(), PricewatchError> {
        Ok(())
    }
}
