//! Notifier that records transition events in the log.

use crate::domain::error::PricewatchError;
use crate::domain::rule_eval::SaleEvent;
use crate::ports::notifier_port::NotifierPort;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotifierPort for LogNotifier {
    async fn notify(&self, event: &SaleEvent) -> Result<(), PricewatchError> {
        tracing::info!(
            target: "pricewatch::notify",
            kind = event.kind.as_str(),
            watch_id = %event.watch_id,
            current_price = ?event.snapshot.current_price,
            list_price = ?event.snapshot.list_price,
            currency = event.snapshot.currency.as_deref().unwrap_or(""),
            "sale event"
        );
        Ok(())
    }
}
