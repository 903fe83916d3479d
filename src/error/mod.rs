//! Error types for Scout.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// User-facing text for an empty or whitespace-only question.
pub const INVALID_QUERY_MESSAGE: &str = "Error: Invalid query provided.";

/// User-facing text for an empty search-query extraction.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Error: Could not extract a valid search query.";

/// Primary error type for all Scout operations.
///
/// Search failures are deliberately absent: the search client reports them
/// as [`crate::search::SearchFailure`] values and the pipeline turns them
/// into an apology.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Invalid query: the question is empty")]
    InvalidQuery,

    #[error("Extraction failed: the model returned an empty search query")]
    ExtractionFailed,

    #[error("Upstream error (status {status}): {body}")]
    UpstreamProtocol { status: u16, body: String },

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    #[error("Request construction failed: {0}")]
    RequestConstruction(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Processing error: {0}")]
    Processing(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ScoutError {
    /// Create an upstream protocol error from a status and raw body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamProtocol {
            status,
            body: body.into(),
        }
    }

    /// Classify a transport failure from reqwest.
    ///
    /// Builder failures happen before anything leaves the process; everything
    /// else (connect, timeout, body read) means the request was attempted.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestConstruction(err.to_string())
        } else {
            Self::UpstreamUnreachable(err)
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidQuery | Self::ExtractionFailed => ErrorCategory::Input,
            Self::UpstreamProtocol { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::UpstreamUnreachable(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::UpstreamUnreachable(_) => ErrorCategory::Network,
            Self::RequestConstruction(_) => ErrorCategory::Request,
            Self::MalformedResponse(_) => ErrorCategory::Api,
            Self::Processing(_) => ErrorCategory::Serialization,
            Self::Configuration(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the pipeline recovers this error into a user-facing answer.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidQuery | Self::ExtractionFailed)
    }

    /// User-facing text for the recoverable kinds.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidQuery => Some(INVALID_QUERY_MESSAGE),
            Self::ExtractionFailed => Some(EXTRACTION_FAILED_MESSAGE),
            _ => None,
        }
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Input => RecoverySuggestion::RephraseQuestion,
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Network | ErrorCategory::Server => RecoverySuggestion::TryAgainLater,
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration | ErrorCategory::Request => {
                RecoverySuggestion::CheckConfiguration
            }
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ScoutError>;
