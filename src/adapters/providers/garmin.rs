//! Garmin storefront price provider.

use crate::adapters::providers::http;
use crate::adapters::providers::url_template;
use crate::domain::error::PricewatchError;
use crate::domain::settings::GarminSettings;
use crate::domain::snapshot::Snapshot;
use crate::ports::provider_port::PriceProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const NAME: &str = "garmin";

/// Per-watch settings; anything unset falls back to [`GarminSettings`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminConfig {
    pub sku: String,
    pub country: Option<String>,
    pub locale: Option<String>,
    pub customer_group: Option<String>,
}

impl GarminConfig {
    pub fn parse(config: &Map<String, Value>) -> Result<Self, PricewatchError> {
        let parsed: GarminConfig = serde_json::from_value(Value::Object(config.clone()))
            .map_err(|e| invalid(e.to_string()))?;

        if parsed.sku.trim().is_empty() {
            return Err(invalid("sku must not be empty"));
        }
        check_len("country", parsed.country.as_deref(), 2)?;
        check_len("locale", parsed.locale.as_deref(), 2)?;
        check_len("customerGroup", parsed.customer_group.as_deref(), 1)?;
        Ok(parsed)
    }
}

fn check_len(field: &str, value: Option<&str>, min: usize) -> Result<(), PricewatchError> {
    match value {
        Some(v) if v.chars().count() < min => Err(invalid(format!(
            "{} must be at least {} characters",
            field, min
        ))),
        _ => Ok(()),
    }
}

fn invalid(reason: impl Into<String>) -> PricewatchError {
    PricewatchError::ProviderConfig {
        provider: NAME.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
    #[serde(default)]
    sale_price: Option<PricePoint>,
    #[serde(default)]
    list_price: Option<PricePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricePoint {
    price: Option<f64>,
    currency_code: Option<String>,
}

impl PriceResponse {
    /// A non-null `salePrice` supplies the current price; otherwise the list
    /// price is also the current price.
    fn into_snapshot(self) -> Snapshot {
        let list_price = self.list_price.as_ref().and_then(|p| p.price);
        let current_price = match &self.sale_price {
            Some(sale) => sale.price,
            None => list_price,
        };
        Snapshot {
            current_price,
            list_price,
            currency: self.list_price.and_then(|p| p.currency_code),
        }
    }
}

pub struct GarminProvider {
    client: Client,
    settings: GarminSettings,
}

impl GarminProvider {
    pub fn new(client: Client, settings: GarminSettings) -> Self {
        Self { client, settings }
    }

    pub fn url_for(&self, config: &GarminConfig) -> Result<String, PricewatchError> {
        let template = self
            .settings
            .template
            .as_deref()
            .ok_or_else(|| invalid("no URL template configured ([provider.garmin] template)"))?;

        let country = config.country.as_deref().unwrap_or(&self.settings.country);
        let locale = config.locale.as_deref().unwrap_or(&self.settings.locale);
        let customer_group = config
            .customer_group
            .as_deref()
            .unwrap_or(&self.settings.customer_group);

        url_template::build_url(
            template,
            &[("country", Some(country)), ("sku", Some(config.sku.as_str()))],
            &[
                ("locale", Some(locale)),
                ("customerGroup", Some(customer_group)),
            ],
        )
    }
}

#[async_trait]
impl PriceProvider for GarminProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, config: &Map<String, Value>) -> Result<Snapshot, PricewatchError> {
        let config = GarminConfig::parse(config)?;
        let url = self.url_for(&config)?;
        let response: PriceResponse = http::fetch_json(&self.client, &url).await?;
        Ok(response.into_snapshot())
    }
}
