//! Search seam: a backend turns one query into data or an error value.
//!
//! Backends never return `Err`. Every failure becomes a [`SearchFailure`],
//! which the agent renders as an apology instead of feeding it to the model.

pub mod serp;

pub use serp::{google_search_url, SerpClient};

use std::fmt;

use async_trait::async_trait;
use serde_json::{json, Value};

/// A search capability the agent can call.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> SearchOutcome;
}

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchPayload),
    Failed(SearchFailure),
}

impl SearchOutcome {
    /// The `{ "error": ... }` shape for failures, the raw payload otherwise.
    pub fn into_value(self) -> Value {
        match self {
            Self::Found(payload) => payload.into_inner(),
            Self::Failed(failure) => failure.to_value(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Provider data whose schema is not ours to know.
///
/// The only thing the agent does with it is render it to text.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPayload(Value);

impl SearchPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }

    /// `null`, `""`, `[]` and `{}` carry nothing worth synthesizing from.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Message of a top-level `{ "error": ... }` object handed back as data.
    pub fn error_marker(&self) -> Option<String> {
        let error = self.0.as_object()?.get("error")?;
        Some(match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for SearchPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Why a search produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailureKind {
    /// The provider rejected the API token (HTTP 401).
    Authentication,
    /// Any other HTTP error status.
    Http(u16),
    /// Success status with nothing in the body.
    EmptyBody,
    /// Connect, timeout, or body-read failure.
    Transport,
    /// The body was not JSON.
    Decode,
}

/// A search failure, reported as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    pub kind: SearchFailureKind,
    pub message: String,
}

impl SearchFailure {
    pub fn new(kind: SearchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn authentication() -> Self {
        Self::new(
            SearchFailureKind::Authentication,
            "Search API authentication failed. Please check the search API token.",
        )
    }

    pub fn is_authentication(&self) -> bool {
        self.kind == SearchFailureKind::Authentication
    }

    pub fn to_value(&self) -> Value {
        json!({ "error": self.message })
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_shapes_are_detected() {
        for value in [json!(null), json!(""), json!("  "), json!([]), json!({})] {
            assert!(SearchPayload::new(value.clone()).is_empty(), "{value}");
        }
        assert!(!SearchPayload::new(json!({ "organic": [] })).is_empty());
        assert!(!SearchPayload::new(json!(0)).is_empty());
    }

    #[test]
    fn error_marker_reads_top_level_error_only() {
        let payload = SearchPayload::new(json!({ "error": "quota exceeded" }));
        assert_eq!(payload.error_marker().as_deref(), Some("quota exceeded"));

        let nested = SearchPayload::new(json!({ "organic": [{ "error": "x" }] }));
        assert_eq!(nested.error_marker(), None);
    }

    #[test]
    fn failures_render_as_error_objects() {
        let outcome = SearchOutcome::Failed(SearchFailure::new(
            SearchFailureKind::Http(503),
            "API returned status 503",
        ));
        assert!(outcome.is_failure());
        assert_eq!(
            outcome.into_value(),
            json!({ "error": "API returned status 503" })
        );
    }

    #[test]
    fn payload_text_is_pretty_printed() {
        let payload = SearchPayload::new(json!({ "a": 1 }));
        assert_eq!(payload.to_text().unwrap(), "{\n  \"a\": 1\n}");
    }
}
