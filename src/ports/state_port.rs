//! State persistence port.

use crate::domain::error::PricewatchError;
use crate::domain::state::StateFile;
use async_trait::async_trait;

/// Durable record of [`StateFile`], keyed by watch id.
#[async_trait]
pub trait StatePort: Send + Sync {
    /// Loads the persisted state. A missing or corrupt record loads as empty.
    async fn load(&self) -> Result<StateFile, PricewatchError>;

    /// Replaces the persisted state with `state` in a single write.
    async fn save(&self, state: &StateFile) -> Result<(), PricewatchError>;
}
