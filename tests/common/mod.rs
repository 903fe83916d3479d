//! Shared test helpers: scripted language model and search backend.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use scout::error::ScoutError;
use scout::provider::LanguageModel;
use scout::search::{SearchBackend, SearchOutcome};
use scout::types::ChatMessage;

/// One call made against a mock language model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCall {
    Generate(String),
    Chat(Vec<ChatMessage>),
}

/// A canned model reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Status(u16, String),
}

impl Reply {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    fn into_result(self) -> Result<String, ScoutError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Status(status, body) => Err(ScoutError::upstream(status, body)),
        }
    }
}

/// A model that returns queued replies in order and records every call.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<ModelCall>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: &[&str]) -> Self {
        let model = Self::new();
        for reply in replies {
            model.queue(Reply::text(reply));
        }
        model
    }

    pub fn queue(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next(&self, call: ModelCall) -> Result<String, ScoutError> {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .map(Reply::into_result)
            .unwrap_or_else(|| Err(ScoutError::MalformedResponse("no scripted reply".into())))
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ScoutError> {
        self.next(ModelCall::Generate(prompt.to_string()))
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ScoutError> {
        self.next(ModelCall::Chat(messages.to_vec()))
    }
}

/// A model whose reply is computed from the call, for order-independent tests.
pub struct RuleModel<F> {
    rule: F,
}

impl<F> RuleModel<F>
where
    F: Fn(&ModelCall) -> String + Send + Sync,
{
    pub fn new(rule: F) -> Self {
        Self { rule }
    }
}

#[async_trait]
impl<F> LanguageModel for RuleModel<F>
where
    F: Fn(&ModelCall) -> String + Send + Sync,
{
    fn model_id(&self) -> &str {
        "rule-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ScoutError> {
        tokio::task::yield_now().await;
        Ok((self.rule)(&ModelCall::Generate(prompt.to_string())))
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ScoutError> {
        tokio::task::yield_now().await;
        Ok((self.rule)(&ModelCall::Chat(messages.to_vec())))
    }
}

/// A search backend that always returns the same outcome and records queries.
pub struct StaticSearch {
    outcome: SearchOutcome,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn new(outcome: SearchOutcome) -> Self {
        Self {
            outcome,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchBackend for StaticSearch {
    async fn search(&self, query: &str) -> SearchOutcome {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.clone()
    }
}
