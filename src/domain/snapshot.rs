//! Normalized price observation returned by a provider.

use serde::Serialize;

/// Price facts for one watch at one point in time.
///
/// Providers build a fresh snapshot on every fetch; it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_price: Option<f64>,
    pub list_price: Option<f64>,
    pub currency: Option<String>,
}

impl Snapshot {
    pub fn new(current_price: f64, list_price: f64) -> Self {
        Self {
            current_price: Some(current_price),
            list_price: Some(list_price),
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Both prices, or the name of the first one that is missing.
    pub fn prices(&self) -> Result<(f64, f64), &'static str> {
        match (self.current_price, self.list_price) {
            (Some(current), Some(list)) => Ok((current, list)),
            (None, _) => Err("currentPrice"),
            (Some(_), None) => Err("listPrice"),
        }
    }
}
