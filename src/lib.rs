//! Scout: a decide-then-retrieve-then-synthesize question answering agent.
//!
//! Given a question, the [`agent::Agent`] asks a language model whether web
//! data is needed, optionally fetches search results from a SERP API, and
//! asks the model to answer from those results.
//!
//! # Quick Start
//!
//! ```no_run
//! use scout::prelude::*;
//!
//! # async fn example() -> scout::error::Result<()> {
//! let config = AgentConfig::builder()
//!     .endpoint_base_url("https://llm.example.com")
//!     .model("gpt-4o-mini")
//!     .search_api_token("token")
//!     .search_zone("serp_api1")
//!     .build();
//! let agent = Agent::new(config)?;
//! let answer = agent.run("What's the weather in Tokyo today?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod search;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
