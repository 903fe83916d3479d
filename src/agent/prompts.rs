//! Prompt templates and the text contracts between pipeline stages.

/// Persona for the synthesis call.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that answers questions based on search results. Be concise and accurate.";

/// Retrieval text when the search produced nothing.
pub const NO_RESULTS_SENTINEL: &str = "No results found.";

/// Prefix of retrieval text describing a failed search.
pub const ERROR_PREFIX: &str = "Error:";

pub fn classification_prompt(query: &str) -> String {
    format!(
        "Does this question require searching the web for current information? Answer only YES or NO.\n\nQuestion: {query}\n\nAnswer:"
    )
}

pub fn extraction_prompt(query: &str) -> String {
    format!("Extract a concise search query (3-6 words) from this question:\n\nQuestion: {query}\n\nSearch query:")
}

pub fn synthesis_prompt(query: &str, search_results: &str) -> String {
    format!(
        "Based on the following search results, answer the user's question accurately and concisely.\n\nUser Question: {query}\n\nSearch Results:\n{search_results}\n\nAnswer:"
    )
}

/// Retrieval text for a failed search.
pub fn search_error_text(reason: &str) -> String {
    format!("{ERROR_PREFIX} {reason}")
}

/// Whether a classification response routes to search.
///
/// Any occurrence of "yes", in any case, counts. That includes words such as
/// "yesterday"; callers relying on strict YES/NO tokens must not use this.
pub fn wants_search(response: &str) -> bool {
    response.to_lowercase().contains("yes")
}

/// What the retrieval text says about the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStatus<'a> {
    Results(&'a str),
    NoResults,
    Failed(&'a str),
}

impl<'a> RetrievalStatus<'a> {
    pub fn inspect(text: &'a str) -> Self {
        if text == NO_RESULTS_SENTINEL {
            Self::NoResults
        } else if let Some(reason) = text.strip_prefix(ERROR_PREFIX) {
            Self::Failed(reason.trim_start())
        } else {
            Self::Results(text)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Results(_) => "results",
            Self::NoResults => "no_results",
            Self::Failed(_) => "failed",
        }
    }
}

/// Fixed reply when there is nothing to synthesize from.
pub fn apology(query: &str, status: RetrievalStatus<'_>) -> Option<String> {
    match status {
        RetrievalStatus::Results(_) => None,
        RetrievalStatus::NoResults => Some(format!(
            "I couldn't find information about \"{query}\" because the search returned no results. Please try rephrasing your question."
        )),
        RetrievalStatus::Failed(reason) => Some(format!(
            "I couldn't find information about \"{query}\" because the search failed. Reason: {reason}"
        )),
    }
}
