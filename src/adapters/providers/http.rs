//! Shared HTTP plumbing for providers.

use crate::domain::error::PricewatchError;
use crate::domain::settings::HttpSettings;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const SNIPPET_LIMIT: usize = 2000;

/// Builds the client shared by all providers for one run.
pub fn build_client(settings: &HttpSettings) -> Result<Client, PricewatchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    Client::builder()
        .user_agent(
            settings
                .user_agent
                .as_deref()
                .unwrap_or(DEFAULT_USER_AGENT),
        )
        .default_headers(headers)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| PricewatchError::ConfigInvalid {
            section: "http".to_string(),
            key: "user_agent".to_string(),
            reason: e.to_string(),
        })
}

/// GETs `url` and decodes the JSON body.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, PricewatchError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| PricewatchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = resp.status();
    tracing::debug!(url, status = status.as_u16(), "response");

    let body = resp.text().await.map_err(|e| PricewatchError::Network {
        url: url.to_string(),
        reason: format!("read body failed: {}", e),
    })?;

    decode_body(url, status, &body)
}

pub(crate) fn decode_body<T: DeserializeOwned>(
    url: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, PricewatchError> {
    if !status.is_success() {
        return Err(PricewatchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
            snippet: Some(snippet(body, SNIPPET_LIMIT)).filter(|s| !s.is_empty()),
        });
    }

    serde_json::from_str(body).map_err(|e| PricewatchError::InvalidResponse {
        url: url.to_string(),
        reason: format!(
            "expected JSON ({}); body starts with: {}",
            e,
            snippet(body, 200)
        ),
    })
}

/// First `limit` characters of `body`, with an ellipsis when truncated.
pub fn snippet(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
