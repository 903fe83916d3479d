//! OpenAI-compatible chat client with a one-shot native fallback.
//!
//! The primary attempt always goes to `/v1/chat/completions`. Deployments
//! that answer 404 or 405 there get exactly one more attempt on the native
//! endpoint matching the call shape (`/api/generate` for prompts,
//! `/api/chat` for message lists). Nothing else is retried.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{AgentConfig, DEFAULT_LLM_TIMEOUT, DEFAULT_MODEL};
use crate::error::{Result, ScoutError};
use crate::types::{
    ChatMessage, CompletionRequest, GenerationSettings, NativeChatRequest, NativeGenerateRequest,
};

use super::http::{bearer_headers, build_client, string_at, PathSegment};
use super::LanguageModel;

use super::http::PathSegment::{Index, Key};

const CHOICE_CONTENT: &[PathSegment] = &[Key("choices"), Index(0), Key("message"), Key("content")];
const MESSAGE_CONTENT: &[PathSegment] = &[Key("message"), Key("content")];
const GENERATE_RESPONSE: &[PathSegment] = &[Key("response")];

/// Which calling convention a request is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatProtocol {
    /// `POST /v1/chat/completions`
    Primary,
    /// `POST /api/generate`, used for single prompts after the primary is rejected.
    FallbackGenerate,
    /// `POST /api/chat`, used for message lists after the primary is rejected.
    FallbackChat,
}

impl ChatProtocol {
    pub fn path(self) -> &'static str {
        match self {
            Self::Primary => "/v1/chat/completions",
            Self::FallbackGenerate => "/api/generate",
            Self::FallbackChat => "/api/chat",
        }
    }

    /// Pull the assistant text out of a decoded success body.
    fn extract(self, body: &Value) -> Result<String> {
        let text = match self {
            Self::Primary => string_at(body, CHOICE_CONTENT)?,
            Self::FallbackGenerate => match body.get("response") {
                Some(_) => string_at(body, GENERATE_RESPONSE)?,
                None => string_at(body, MESSAGE_CONTENT)?,
            },
            Self::FallbackChat => string_at(body, MESSAGE_CONTENT)?,
        };
        Ok(text.to_string())
    }
}

impl fmt::Display for ChatProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primary => "primary",
            Self::FallbackGenerate => "fallback-generate",
            Self::FallbackChat => "fallback-chat",
        })
    }
}

/// Outcome of the primary attempt.
enum Attempt {
    Answered(String),
    /// The deployment does not serve the primary endpoint shape.
    Unsupported(u16),
}

/// Strip trailing slashes and a trailing `/api` segment.
///
/// ```
/// use scout::provider::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:11434/api/"), "http://localhost:11434");
/// assert_eq!(normalize_base_url("https://hub.example.com/"), "https://hub.example.com");
/// ```
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}

/// Client for an OpenAI-compatible chat deployment.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .finish()
    }
}

impl ChatClient {
    /// Create a client for `base_url`, using [`DEFAULT_MODEL`] when `model` is `None`.
    pub fn new(base_url: &str, model: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, DEFAULT_LLM_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, model: Option<String>, timeout: Duration) -> Result<Self> {
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            http: build_client(timeout)?,
            base_url: normalize_base_url(base_url),
            model,
            api_key: None,
        })
    }

    /// Build from agent configuration.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let client = Self::with_timeout(
            &config.endpoint_base_url,
            Some(config.model.clone()),
            config.llm_timeout,
        )?;
        Ok(match &config.llm_api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }

    /// Send `Authorization: Bearer <key>` on every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, protocol: ChatProtocol, body: &impl Serialize) -> Result<(u16, String)> {
        let url = format!("{}{}", self.base_url, protocol.path());
        debug!(%url, %protocol, model = %self.model, "chat request");

        let resp = self
            .http
            .post(&url)
            .headers(bearer_headers(self.api_key.as_deref()))
            .json(body)
            .send()
            .await
            .map_err(ScoutError::from_transport)?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(ScoutError::from_transport)?;
        Ok((status, text))
    }

    fn decode(protocol: ChatProtocol, text: &str) -> Result<String> {
        let body: Value = serde_json::from_str(text).map_err(|e| {
            ScoutError::MalformedResponse(format!("{protocol} response is not valid JSON: {e}"))
        })?;
        protocol.extract(&body)
    }

    async fn primary(
        &self,
        messages: &[ChatMessage],
        settings: GenerationSettings,
    ) -> Result<Attempt> {
        let request = CompletionRequest::new(&self.model, messages, settings);
        let (status, text) = self.post(ChatProtocol::Primary, &request).await?;
        match status {
            200..=299 => Self::decode(ChatProtocol::Primary, &text).map(Attempt::Answered),
            404 | 405 => Ok(Attempt::Unsupported(status)),
            _ => {
                warn!(status, body = %text, "chat completion failed");
                Err(ScoutError::upstream(status, text))
            }
        }
    }

    async fn fallback(&self, protocol: ChatProtocol, body: &impl Serialize) -> Result<String> {
        let (status, text) = self.post(protocol, body).await?;
        if !(200..=299).contains(&status) {
            warn!(status, %protocol, body = %text, "native fallback failed");
            return Err(ScoutError::upstream(status, text));
        }
        Self::decode(protocol, &text)
    }
}

#[async_trait]
impl LanguageModel for ChatClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = [ChatMessage::user(prompt)];
        match self.primary(&messages, GenerationSettings::PROMPT).await? {
            Attempt::Answered(text) => Ok(text),
            Attempt::Unsupported(status) => {
                debug!(status, "primary endpoint unsupported, using /api/generate");
                let body = NativeGenerateRequest {
                    model: &self.model,
                    prompt,
                    stream: false,
                };
                self.fallback(ChatProtocol::FallbackGenerate, &body).await
            }
        }
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        match self.primary(messages, GenerationSettings::CHAT).await? {
            Attempt::Answered(text) => Ok(text),
            Attempt::Unsupported(status) => {
                debug!(status, "primary endpoint unsupported, using /api/chat");
                let body = NativeChatRequest {
                    model: &self.model,
                    messages,
                    stream: false,
                };
                self.fallback(ChatProtocol::FallbackChat, &body).await
            }
        }
    }
}
