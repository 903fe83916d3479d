//! Stage-boundary notifications.
//!
//! The pipeline reports each transition to a [`StageObserver`]. The default
//! [`TracingObserver`] turns them into `tracing` events; [`RecordingObserver`]
//! keeps them in memory.

use std::sync::Mutex;

use strum::Display;
use tracing::{debug, info};

/// Whether the agent may consult the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchMode {
    /// Let the model decide.
    #[default]
    Auto,
    /// Always answer directly.
    Disabled,
}

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Validate,
    Classify,
    Extract,
    Search,
    Synthesize,
}

/// How the final answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AnswerRoute {
    /// The model answered the question without search.
    Direct,
    /// The model answered from search results.
    Synthesized,
    /// The search failed or was empty; a fixed apology was returned.
    Apology,
}

/// One stage transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    Validated {
        query: String,
        valid: bool,
        mode: SearchMode,
    },
    Classified {
        needs_search: bool,
        response: String,
    },
    Extracted {
        search_query: String,
    },
    Searched {
        search_query: String,
        status: &'static str,
        length: usize,
    },
    Answered {
        route: AnswerRoute,
        length: usize,
    },
}

impl StageEvent {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Validated { .. } => Stage::Validate,
            Self::Classified { .. } => Stage::Classify,
            Self::Extracted { .. } => Stage::Extract,
            Self::Searched { .. } => Stage::Search,
            Self::Answered { .. } => Stage::Synthesize,
        }
    }
}

/// Receives stage transitions from the agent.
pub trait StageObserver: Send + Sync {
    fn on_stage(&self, event: &StageEvent);
}

impl<F> StageObserver for F
where
    F: Fn(&StageEvent) + Send + Sync,
{
    fn on_stage(&self, event: &StageEvent) {
        self(event)
    }
}

/// Logs stage transitions through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn on_stage(&self, event: &StageEvent) {
        let stage = event.stage();
        match event {
            StageEvent::Validated { query, valid, mode } => {
                debug!(%stage, %query, valid, %mode, "query validated")
            }
            StageEvent::Classified {
                needs_search,
                response,
            } => info!(%stage, needs_search, %response, "classification"),
            StageEvent::Extracted { search_query } => {
                info!(%stage, %search_query, "search query extracted")
            }
            StageEvent::Searched {
                search_query,
                status,
                length,
            } => info!(%stage, %search_query, status, length, "search completed"),
            StageEvent::Answered { route, length } => {
                info!(%stage, %route, length, "answer ready")
            }
        }
    }
}

/// Keeps every event it sees, in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<StageEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StageEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.events().iter().map(StageEvent::stage).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl StageObserver for RecordingObserver {
    fn on_stage(&self, event: &StageEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
