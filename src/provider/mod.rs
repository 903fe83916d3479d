//! Language-model seam and the OpenAI-compatible client.

pub mod http;
pub mod openai_compatible;

pub use openai_compatible::{normalize_base_url, ChatClient, ChatProtocol};

use async_trait::async_trait;

use crate::error::ScoutError;
use crate::types::ChatMessage;

/// Core trait implemented by every language-model client the agent can drive.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// The model ID this client sends upstream.
    fn model_id(&self) -> &str;

    /// Send a single prompt as one user message and return the assistant text.
    async fn generate(&self, prompt: &str) -> Result<String, ScoutError>;

    /// Send an ordered message sequence unmodified and return the assistant text.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ScoutError>;
}
