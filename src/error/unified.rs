//! Error classification and recovery.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Authentication,
    Network,
    Timeout,
    Server,
    Api,
    Request,
    Configuration,
    Serialization,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RephraseQuestion,
    CheckCredentials,
    CheckConfiguration,
    IncreaseTimeout,
    TryAgainLater,
    ContactSupport,
}
