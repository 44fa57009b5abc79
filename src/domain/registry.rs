//! Provider registry.
//!
//! Built once at startup and handed to the run; tests register mock providers.

use crate::domain::error::PricewatchError;
use crate::ports::provider_port::PriceProvider;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Box<dyn PriceProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under its own name, replacing any previous entry.
    pub fn register(&mut self, provider: Box<dyn PriceProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    pub fn with(mut self, provider: Box<dyn PriceProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, name: &str) -> Result<&dyn PriceProvider, PricewatchError> {
        self.providers
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| PricewatchError::UnknownProvider {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
