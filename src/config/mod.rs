//! Agent configuration.
//!
//! Everything is passed in explicitly; this module never reads the process
//! environment. The `cli` layer is responsible for resolving values from
//! flags, env vars, or `.env` files.

use std::fmt;
use std::time::Duration;

use bon::Builder;

use crate::error::{Result, ScoutError};

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Search provider zone used when the caller does not name one.
pub const DEFAULT_SEARCH_ZONE: &str = "serp_api1";

/// Base URL of the SERP provider API.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.brightdata.com";

/// Language-model calls tolerate slow inference.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// Search blocks the whole pipeline, so it fails fast.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable configuration for an [`crate::agent::Agent`] and its clients.
///
/// ```
/// use scout::config::AgentConfig;
///
/// let config = AgentConfig::builder()
///     .endpoint_base_url("http://localhost:11434")
///     .model("llama3")
///     .search_api_token("token")
///     .search_zone("serp_api1")
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Builder)]
pub struct AgentConfig {
    #[builder(into)]
    pub endpoint_base_url: String,
    #[builder(into)]
    pub model: String,
    #[builder(into)]
    pub search_api_token: String,
    #[builder(into)]
    pub search_zone: String,
    /// Bearer token for the chat endpoint, when it requires one.
    #[builder(into)]
    pub llm_api_key: Option<String>,
    #[builder(into, default = DEFAULT_SEARCH_BASE_URL.to_string())]
    pub search_base_url: String,
    #[builder(default = DEFAULT_LLM_TIMEOUT)]
    pub llm_timeout: Duration,
    #[builder(default = DEFAULT_SEARCH_TIMEOUT)]
    pub search_timeout: Duration,
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("endpoint_base_url", &self.endpoint_base_url)
            .field("model", &self.model)
            .field("search_api_token", &"..")
            .field("search_zone", &self.search_zone)
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| ".."))
            .field("search_base_url", &self.search_base_url)
            .field("llm_timeout", &self.llm_timeout)
            .field("search_timeout", &self.search_timeout)
            .finish()
    }
}

impl AgentConfig {
    /// Reject blank required values.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("endpoint_base_url", &self.endpoint_base_url),
            ("model", &self.model),
            ("search_api_token", &self.search_api_token),
            ("search_zone", &self.search_zone),
            ("search_base_url", &self.search_base_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ScoutError::Configuration(format!("{name} is required")));
            }
        }
        if self.llm_timeout.is_zero() || self.search_timeout.is_zero() {
            return Err(ScoutError::Configuration(
                "timeouts must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
