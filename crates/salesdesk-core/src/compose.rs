//! Answer Composer: the final `answer + sources` assembly.
//!
//! Whichever path produced the answer, the sources list makes it traceable
//! to the rep records behind it. The generation capability returns only
//! prose; attribution always comes from here.

use serde::Serialize;

use crate::analytics::AnalyticsReport;
use crate::retrieval::RetrievalResult;

/// Answer text returned when neither retrieval channel produced a document.
/// The caller must use this instead of generating from an empty context.
pub const INSUFFICIENT_DATA_ANSWER: &str =
    "I don't have enough sales data to answer that question.";

/// The structured answer returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FinalAnswer {
    pub answer: String,
    /// Rep names behind the answer: retrieval order for the general path,
    /// report labeling order for the analytics path. Deduplicated.
    pub sources: Vec<String>,
}

/// Compose a general-path answer from generated text and the retrieval that
/// fed it.
pub fn compose_general(answer: String, retrieval: &RetrievalResult) -> FinalAnswer {
    FinalAnswer {
        answer,
        sources: retrieval.source_names(),
    }
}

/// Compose an analytics-path answer from a report.
pub fn compose_analytics(report: &AnalyticsReport) -> FinalAnswer {
    FinalAnswer {
        answer: report.render(),
        sources: report.rep_names(),
    }
}

/// The empty-retrieval answer: honest, with no sources to cite.
pub fn insufficient_data() -> FinalAnswer {
    FinalAnswer {
        answer: INSUFFICIENT_DATA_ANSWER.to_string(),
        sources: Vec::new(),
    }
}
