//! CLI entry point for Scout.
//!
//! This is the only module that knows about environment variables: clap
//! resolves each connection flag from its `SCOUT_*` variable when the flag
//! is absent, after `main` has loaded any `.env` file.

pub mod repl;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::agent::SearchMode;
use crate::config::{
    AgentConfig, DEFAULT_MODEL, DEFAULT_SEARCH_BASE_URL, DEFAULT_SEARCH_ZONE,
};

/// Scout web search agent
#[derive(Parser, Debug)]
#[command(name = "scout", version, about = "Scout: answers questions, searching the web when needed")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log pipeline stages and HTTP calls
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer one question and exit
    Ask(AskArgs),
    /// Answer questions read from stdin until `exit`
    Repl(ReplArgs),
}

/// Arguments for `scout ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Never consult the search API
    #[arg(long)]
    pub no_search: bool,

    /// The question (positional)
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for `scout repl`.
#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Never consult the search API
    #[arg(long)]
    pub no_search: bool,
}

/// Upstream endpoints and credentials.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Chat endpoint base URL (OpenAI-compatible)
    #[arg(long, env = "SCOUT_LLM_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Model name
    #[arg(long, env = "SCOUT_LLM_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Bearer token for the chat endpoint
    #[arg(long, env = "SCOUT_LLM_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Search API token
    #[arg(long, env = "SCOUT_SEARCH_TOKEN", hide_env_values = true, global = true)]
    pub search_token: Option<String>,

    /// Search provider zone
    #[arg(long, env = "SCOUT_SEARCH_ZONE", default_value = DEFAULT_SEARCH_ZONE, global = true)]
    pub search_zone: String,

    /// Search provider API base URL
    #[arg(long, env = "SCOUT_SEARCH_BASE_URL", default_value = DEFAULT_SEARCH_BASE_URL, global = true)]
    pub search_base_url: String,

    /// Chat request timeout in seconds
    #[arg(long, default_value_t = 120, global = true)]
    pub llm_timeout_secs: u64,

    /// Search request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub search_timeout_secs: u64,
}

impl ConnectionArgs {
    /// Build agent configuration. Missing credentials surface when the
    /// agent validates it.
    pub fn to_config(&self) -> AgentConfig {
        AgentConfig::builder()
            .endpoint_base_url(self.base_url.clone().unwrap_or_default())
            .model(self.model.clone())
            .search_api_token(self.search_token.clone().unwrap_or_default())
            .search_zone(self.search_zone.clone())
            .maybe_llm_api_key(self.api_key.clone())
            .search_base_url(self.search_base_url.clone())
            .llm_timeout(Duration::from_secs(self.llm_timeout_secs))
            .search_timeout(Duration::from_secs(self.search_timeout_secs))
            .build()
    }
}

/// Map the `--no-search` flag to a mode.
pub fn search_mode(no_search: bool) -> SearchMode {
    if no_search {
        SearchMode::Disabled
    } else {
        SearchMode::Auto
    }
}
