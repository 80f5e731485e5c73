//! Error taxonomy for question answering.

use thiserror::Error;

/// Failures surfaced to the caller of `answer()`.
///
/// Degraded retrieval (embedding or index failure) is deliberately absent:
/// the retriever recovers locally by falling back to exact-match results and
/// logs a warning instead of failing the request.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The question was empty or whitespace-only. Rejected before any
    /// retrieval or generation work.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// A named rep is absent from the roster. Reported as a structured
    /// not-found, never answered from thin air.
    #[error("sales representative '{name}' not found")]
    RepNotFound { name: String },

    /// The external language-model call errored or timed out after its
    /// bounded retries. Retrieval succeeded; the answer did not.
    #[error("answer generation failed: {reason}")]
    GenerationFailed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_rep() {
        let err = QueryError::RepNotFound {
            name: "Dave".to_string(),
        };
        assert!(err.to_string().contains("Dave"));
    }
}
