//! The decide-then-retrieve-then-synthesize pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::config::AgentConfig;
use crate::error::{Result, ScoutError};
use crate::provider::{ChatClient, LanguageModel};
use crate::search::{SearchBackend, SearchOutcome, SerpClient};
use crate::types::ChatMessage;

use super::observer::{AnswerRoute, SearchMode, StageEvent, StageObserver, TracingObserver};
use super::prompts::{self, RetrievalStatus, NO_RESULTS_SENTINEL, SYNTHESIS_SYSTEM_PROMPT};

/// Answers questions, searching the web first when the model says it must.
///
/// Holds only immutable configuration behind `Arc`s, so one agent can serve
/// concurrent `run` calls.
#[derive(Clone)]
pub struct Agent {
    llm: Arc<dyn LanguageModel>,
    search: Arc<dyn SearchBackend>,
    observer: Arc<dyn StageObserver>,
}

impl Agent {
    /// Build the HTTP clients from configuration.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let llm = ChatClient::from_config(&config)?;
        let search = SerpClient::from_config(&config)?;
        Ok(Self::with_clients(Arc::new(llm), Arc::new(search)))
    }

    /// Assemble an agent from existing clients.
    pub fn with_clients(llm: Arc<dyn LanguageModel>, search: Arc<dyn SearchBackend>) -> Self {
        Self {
            llm,
            search,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default `tracing` observer.
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Answer `query`, letting the model decide whether to search.
    pub async fn run(&self, query: &str) -> Result<String> {
        self.run_with(query, SearchMode::Auto).await
    }

    /// Answer `query` under an explicit search mode.
    pub async fn run_with(&self, query: &str, mode: SearchMode) -> Result<String> {
        let valid = !query.trim().is_empty();
        self.emit(StageEvent::Validated {
            query: query.to_string(),
            valid,
            mode,
        });
        if !valid {
            return Err(ScoutError::InvalidQuery);
        }

        if mode == SearchMode::Disabled || !self.should_search(query).await? {
            return self.answer_directly(query).await;
        }

        let search_query = self.extract_search_query(query).await?;
        let results = self.web_search(&search_query).await?;
        self.generate_answer(query, &results).await
    }

    /// Ask the model whether `query` needs fresh web data.
    pub async fn should_search(&self, query: &str) -> Result<bool> {
        let response = self.llm.generate(&prompts::classification_prompt(query)).await?;
        let needs_search = prompts::wants_search(&response);
        self.emit(StageEvent::Classified {
            needs_search,
            response,
        });
        Ok(needs_search)
    }

    /// Ask the model for a short keyword query. Fails on an empty reply.
    pub async fn extract_search_query(&self, query: &str) -> Result<String> {
        let response = self.llm.generate(&prompts::extraction_prompt(query)).await?;
        let search_query = response.trim().to_string();
        self.emit(StageEvent::Extracted {
            search_query: search_query.clone(),
        });
        if search_query.is_empty() {
            return Err(ScoutError::ExtractionFailed);
        }
        Ok(search_query)
    }

    /// Run the search and render whatever comes back as text.
    ///
    /// Failures become `Error: <reason>`; empty data becomes
    /// [`NO_RESULTS_SENTINEL`]. Only a payload that cannot be serialized
    /// makes this return `Err`.
    pub async fn web_search(&self, search_query: &str) -> Result<String> {
        let search_query = search_query.trim();
        let text = if search_query.is_empty() {
            prompts::search_error_text("Invalid search query provided.")
        } else {
            render_outcome(self.search.search(search_query).await)?
        };
        self.emit(StageEvent::Searched {
            search_query: search_query.to_string(),
            status: RetrievalStatus::inspect(&text).label(),
            length: text.len(),
        });
        Ok(text)
    }

    /// Compose the final answer from rendered search results.
    pub async fn generate_answer(&self, query: &str, search_results: &str) -> Result<String> {
        let status = RetrievalStatus::inspect(search_results);
        if let Some(apology) = prompts::apology(query, status) {
            debug!(status = status.label(), "skipping synthesis");
            self.emit(StageEvent::Answered {
                route: AnswerRoute::Apology,
                length: apology.len(),
            });
            return Ok(apology);
        }

        let messages = [
            ChatMessage::system(SYNTHESIS_SYSTEM_PROMPT),
            ChatMessage::user(prompts::synthesis_prompt(query, search_results)),
        ];
        let answer = self.llm.chat(&messages).await?;
        self.emit(StageEvent::Answered {
            route: AnswerRoute::Synthesized,
            length: answer.len(),
        });
        Ok(answer)
    }

    async fn answer_directly(&self, query: &str) -> Result<String> {
        let answer = self.llm.generate(query).await?;
        self.emit(StageEvent::Answered {
            route: AnswerRoute::Direct,
            length: answer.len(),
        });
        Ok(answer)
    }

    fn emit(&self, event: StageEvent) {
        self.observer.on_stage(&event);
    }
}

/// Turn a search outcome into the retrieval text the synthesis stage reads.
pub fn render_outcome(outcome: SearchOutcome) -> Result<String> {
    match outcome {
        SearchOutcome::Failed(failure) => Ok(prompts::search_error_text(&failure.message)),
        SearchOutcome::Found(payload) => {
            if payload.is_empty() {
                return Ok(NO_RESULTS_SENTINEL.to_string());
            }
            if let Some(reason) = payload.error_marker() {
                return Ok(prompts::search_error_text(&reason));
            }
            Ok(payload.to_text()?)
        }
    }
}
