//! Retail price providers.

pub mod garmin;
pub mod http;
pub mod url_template;

use crate::domain::error::PricewatchError;
use crate::domain::registry::ProviderRegistry;
use crate::domain::settings::Settings;

/// Registry with every built-in provider, sharing one HTTP client.
pub fn default_registry(settings: &Settings) -> Result<ProviderRegistry, PricewatchError> {
    let client = http::build_client(&settings.http)?;
    Ok(ProviderRegistry::new().with(Box::new(garmin::GarminProvider::new(
        client,
        settings.garmin.clone(),
    ))))
}
