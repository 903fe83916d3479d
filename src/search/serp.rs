//! SERP-scraping API client.
//!
//! The provider fetches a search-engine results page through its proxy
//! network and returns it lightly parsed, wrapped in a `{ "body": ... }`
//! envelope.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{AgentConfig, DEFAULT_SEARCH_BASE_URL, DEFAULT_SEARCH_TIMEOUT, DEFAULT_SEARCH_ZONE};
use crate::error::Result;
use crate::provider::http::{bearer_headers, build_client};

use super::{SearchBackend, SearchFailure, SearchFailureKind, SearchOutcome, SearchPayload};

const SEARCH_ENGINE_URL: &str = "https://www.google.com/search";

/// Log at most this many bytes of an error body.
const ERROR_BODY_PREVIEW: usize = 500;

/// Target page for a query. Language and region are pinned to English/US.
///
/// ```
/// assert_eq!(
///     scout::search::google_search_url("tokyo weather"),
///     "https://www.google.com/search?q=tokyo+weather&hl=en&gl=us"
/// );
/// ```
pub fn google_search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{SEARCH_ENGINE_URL}?q={encoded}&hl=en&gl=us")
}

#[derive(Debug, Serialize)]
struct FetchRequest<'a> {
    zone: &'a str,
    url: &'a str,
    format: &'static str,
    data_format: &'static str,
}

/// Client for the provider's generic `/request` fetch endpoint.
pub struct SerpClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
    zone: String,
}

impl fmt::Debug for SerpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerpClient")
            .field("base_url", &self.base_url)
            .field("api_token", &"..")
            .field("zone", &self.zone)
            .finish()
    }
}

impl SerpClient {
    /// Create a client, using [`DEFAULT_SEARCH_ZONE`] when `zone` is `None`.
    pub fn new(api_token: impl Into<String>, zone: Option<String>) -> Result<Self> {
        Ok(Self {
            http: build_client(DEFAULT_SEARCH_TIMEOUT)?,
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            api_token: api_token.into(),
            zone: zone
                .filter(|z| !z.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SEARCH_ZONE.to_string()),
        })
    }

    /// Build from agent configuration.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(config.search_api_token.clone(), Some(config.search_zone.clone()))?
            .with_base_url(&config.search_base_url)
            .with_timeout(config.search_timeout)
    }

    /// Point at a different provider host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_client(timeout)?;
        Ok(self)
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    async fn fetch(&self, query: &str) -> std::result::Result<Value, SearchFailure> {
        let target = google_search_url(query);
        let body = FetchRequest {
            zone: &self.zone,
            url: &target,
            format: "json",
            data_format: "parsed_light",
        };
        let endpoint = format!("{}/request", self.base_url);
        debug!(%endpoint, %query, zone = %self.zone, "search request");

        let resp = self
            .http
            .post(&endpoint)
            .query(&[("brd_json", "1")])
            .headers(bearer_headers(Some(&self.api_token)))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "search request failed");
                SearchFailure::new(SearchFailureKind::Transport, e.to_string())
            })?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| SearchFailure::new(SearchFailureKind::Transport, e.to_string()))?;
        debug!(status, "search response");

        if status == 401 {
            warn!(body = %preview(&text), "search API rejected the token");
            return Err(SearchFailure::authentication());
        }
        if status >= 400 {
            warn!(status, body = %preview(&text), "search API error");
            return Err(SearchFailure::new(
                SearchFailureKind::Http(status),
                format!("API returned status {status}"),
            ));
        }
        if text.trim().is_empty() {
            warn!("empty response from search API");
            return Err(SearchFailure::new(
                SearchFailureKind::EmptyBody,
                "Empty response from API",
            ));
        }

        serde_json::from_str(&text)
            .map_err(|e| SearchFailure::new(SearchFailureKind::Decode, e.to_string()))
    }
}

/// Unwrap the provider envelope, keeping the whole response when there is none.
fn unwrap_envelope(data: Value) -> Value {
    match data {
        Value::Object(mut map) if map.contains_key("body") => {
            let body = map.remove("body").unwrap_or(Value::Null);
            match &body {
                Value::Object(inner) => {
                    if let Some(organic) = inner.get("organic").and_then(Value::as_array) {
                        debug!(count = organic.len(), "organic results");
                    }
                }
                Value::Array(items) => debug!(count = items.len(), "results"),
                _ => {}
            }
            body
        }
        other => {
            debug!("no body envelope, returning full response");
            other
        }
    }
}

fn preview(text: &str) -> &str {
    if text.len() <= ERROR_BODY_PREVIEW {
        return text;
    }
    let mut end = ERROR_BODY_PREVIEW;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[async_trait]
impl SearchBackend for SerpClient {
    async fn search(&self, query: &str) -> SearchOutcome {
        match self.fetch(query).await {
            Ok(data) => SearchOutcome::Found(SearchPayload::new(unwrap_envelope(data))),
            Err(failure) => SearchOutcome::Failed(failure),
        }
    }
}
