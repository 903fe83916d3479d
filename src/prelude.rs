//! Convenience re-exports for common use.

pub use crate::agent::{Agent, SearchMode, StageEvent, StageObserver};
pub use crate::config::AgentConfig;
pub use crate::error::{Result, ScoutError};
pub use crate::provider::{ChatClient, LanguageModel};
pub use crate::search::{SearchBackend, SearchOutcome, SerpClient};
pub use crate::types::{ChatMessage, Role};
