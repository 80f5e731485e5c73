//! Vector index abstraction and the in-memory implementation.
//!
//! The [`VectorIndex`] trait is the seam to the external vector store: the
//! retriever only needs `search(query_vec, k)`. The bundled
//! [`InMemoryIndex`] is brute-force cosine similarity over every stored
//! chunk vector — the corpus is one document per rep, so there is nothing
//! to gain from an approximate structure.

use anyhow::Result;

use crate::document::DocChunk;

/// A chunk returned from vector search, with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: DocChunk,
    pub score: f64,
}

/// Read-only vector search over the indexed corpus.
///
/// Implementations must be `Send + Sync`; the index is built once at
/// startup and only read afterwards.
pub trait VectorIndex: Send + Sync {
    /// Return the `k` chunks nearest to `query_vec`, best first.
    fn search(&self, query_vec: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;

    /// Number of indexed chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Brute-force in-memory index: chunks and their embedding vectors, stored
/// side by side in insertion order.
#[derive(Default)]
pub struct InMemoryIndex {
    entries: Vec<(DocChunk, Vec<f32>)>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk with its embedding vector.
    pub fn add(&mut self, chunk: DocChunk, vector: Vec<f32>) {
        self.entries.push((chunk, vector));
    }
}

impl VectorIndex for InMemoryIndex {
    fn search(&self, query_vec: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let mut candidates: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, vec)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query_vec, vec) as f64,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(k);
        Ok(candidates)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cosine similarity between two embedding vectors, in `[-1.0, 1.0]`.
///
/// Returns `0.0` for empty vectors or vectors of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
