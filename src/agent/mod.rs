//! Question-answering agent.

pub mod agent;
pub mod observer;
pub mod prompts;

pub use agent::{render_outcome, Agent};
pub use observer::{
    AnswerRoute, RecordingObserver, SearchMode, Stage, StageEvent, StageObserver, TracingObserver,
};
pub use prompts::RetrievalStatus;
