//! Hybrid Retriever: vector similarity merged with exact name lookup.
//!
//! Pure vector search can miss a directly-named rep when the phrasing is
//! unusual; pure exact match misses paraphrased or comparative questions.
//! The retriever runs both and merges: vector hits first in rank order, then
//! a full document for every rep named in the question that the vector hits
//! did not already cover, the whole sequence deduplicated by rep.
//!
//! The caller embeds the question and passes the vector in; a `None` vector
//! (or a failing index) degrades to exact-match-only retrieval rather than
//! failing the request.

use std::collections::HashSet;

use log::warn;

use crate::document::build_document;
use crate::index::VectorIndex;
use crate::roster::Roster;

/// Retrieval tuning knobs.
#[derive(Debug, Clone)]
pub struct RetrievalParams {
    /// Maximum number of vector hits. Exact-match additions come on top.
    pub top_k: usize,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// How a document earned its place in the result.
#[derive(Debug, Clone, PartialEq)]
pub enum Relevance {
    /// Cosine similarity from the vector index.
    Score(f64),
    /// The rep's name appeared verbatim in the question.
    ExactMatch,
}

/// One retrieved document (a chunk, or a full document for exact matches).
#[derive(Debug, Clone)]
pub struct RetrievedDoc {
    pub rep_id: u32,
    pub rep_name: String,
    pub content: String,
    pub relevance: Relevance,
}

/// Ordered, rep-deduplicated retrieval output.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    pub docs: Vec<RetrievedDoc>,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Rep names in retrieval order, deduplicated — the `sources` of a
    /// general-path answer.
    pub fn source_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.docs
            .iter()
            .filter(|d| seen.insert(d.rep_id))
            .map(|d| d.rep_name.clone())
            .collect()
    }
}

/// Run hybrid retrieval for one question.
///
/// `query_vec` is the pre-computed question embedding; `None` means the
/// embedding step already failed and only exact matching applies.
/// `rep_hint` moves the hinted rep to the front of the exact-match scan; it
/// never suppresses other matches.
pub fn retrieve(
    index: &dyn VectorIndex,
    roster: &Roster,
    question: &str,
    query_vec: Option<&[f32]>,
    params: &RetrievalParams,
    rep_hint: Option<u32>,
) -> RetrievalResult {
    let vector_hits = match query_vec {
        Some(qv) => match index.search(qv, params.top_k) {
            Ok(hits) => hits,
            Err(err) => {
                warn!("vector search failed, falling back to exact matches: {err:#}");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let mut seen: HashSet<u32> = HashSet::new();
    let mut docs: Vec<RetrievedDoc> = Vec::new();

    for hit in vector_hits {
        if seen.insert(hit.chunk.meta.rep_id) {
            docs.push(RetrievedDoc {
                rep_id: hit.chunk.meta.rep_id,
                rep_name: hit.chunk.meta.rep_name.clone(),
                content: hit.chunk.text,
                relevance: Relevance::Score(hit.score),
            });
        }
    }

    let mut named = roster.named_in(question);
    if let Some(hint) = rep_hint {
        if let Some(pos) = named.iter().position(|rep| rep.id == hint) {
            let hinted = named.remove(pos);
            named.insert(0, hinted);
        }
    }

    for rep in named {
        if seen.insert(rep.id) {
            let doc = build_document(rep);
            docs.push(RetrievedDoc {
                rep_id: rep.id,
                rep_name: rep.name.clone(),
                content: doc.content,
                relevance: Relevance::ExactMatch,
            });
        }
    }

    RetrievalResult { docs }
}
