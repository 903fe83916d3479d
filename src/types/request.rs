//! Completion request bodies.

use serde::Serialize;

use super::message::ChatMessage;

/// Sampling settings for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationSettings {
    /// Settings for single-prompt calls.
    pub const PROMPT: Self = Self {
        temperature: 0.7,
        max_tokens: 1000,
    };

    /// Settings for multi-message calls.
    pub const CHAT: Self = Self {
        temperature: 0.7,
        max_tokens: 2000,
    };
}

/// Body of `POST /v1/chat/completions`. Built fresh for every call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [ChatMessage], settings: GenerationSettings) -> Self {
        Self {
            model,
            messages,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            stream: false,
        }
    }
}

/// Body of the native `POST /api/generate` fallback.
#[derive(Debug, Clone, Serialize)]
pub struct NativeGenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

/// Body of the native `POST /api/chat` fallback.
#[derive(Debug, Clone, Serialize)]
pub struct NativeChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_never_streams() {
        let messages = vec![ChatMessage::user("hi")];
        let body =
            serde_json::to_value(CompletionRequest::new("m", &messages, GenerationSettings::CHAT))
                .unwrap();
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0]["role"], "user");
    }
}
