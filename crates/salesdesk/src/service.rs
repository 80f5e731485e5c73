//! Service wiring: corpus construction at startup and per-question answering.
//!
//! A [`DeskService`] owns the read-only roster, the document corpus, and the
//! vector index, all built once in [`DeskService::build`] and then shared
//! across requests without locking. Each [`answer`](DeskService::answer)
//! call is independent; no conversation state is kept between calls.

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use salesdesk_core::analytics::{compare, performance_summary, AnalyticsReport};
use salesdesk_core::compose::{compose_analytics, compose_general, insufficient_data, FinalAnswer};
use salesdesk_core::document::{build_document, chunk_document};
use salesdesk_core::error::QueryError;
use salesdesk_core::index::{InMemoryIndex, VectorIndex};
use salesdesk_core::retrieval::{retrieve, RetrievalResult};
use salesdesk_core::roster::Roster;
use salesdesk_core::router::{classify, Route};

use crate::config::Config;
use crate::embedding::{embed_query, embed_texts};
use crate::generation::generate;

/// The assembled question-answering service.
pub struct DeskService {
    config: Config,
    roster: Arc<Roster>,
    index: InMemoryIndex,
}

impl DeskService {
    /// Build the corpus and vector index from the loaded roster.
    ///
    /// One document per rep, chunked per the configured window, embedded in
    /// batches when an embedding provider is enabled. With embeddings
    /// disabled the index stays empty and retrieval runs exact-match-only.
    pub async fn build(config: Config, roster: Arc<Roster>) -> Result<Self> {
        let documents: Vec<_> = roster.all().iter().map(build_document).collect();

        let chunks: Vec<_> = documents
            .iter()
            .flat_map(|doc| {
                chunk_document(
                    doc,
                    config.chunking.chunk_size,
                    config.chunking.chunk_overlap,
                )
            })
            .collect();

        let mut index = InMemoryIndex::new();

        if config.embedding.is_enabled() {
            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
            let mut vectors = Vec::with_capacity(texts.len());
            for batch in texts.chunks(config.embedding.batch_size) {
                let mut batch_vectors = embed_texts(&config.embedding, batch).await?;
                vectors.append(&mut batch_vectors);
            }
            anyhow::ensure!(
                vectors.len() == chunks.len(),
                "embedding returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            );
            for (chunk, vector) in chunks.into_iter().zip(vectors) {
                index.add(chunk, vector);
            }
            info!(
                "indexed {} chunks from {} reps",
                index.len(),
                roster.len()
            );
        } else {
            info!(
                "embedding provider disabled; retrieval will use exact name matches only ({} reps)",
                roster.len()
            );
        }

        Ok(Self {
            config,
            roster,
            index,
        })
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Answer one question.
    ///
    /// Routing happens first: analytics questions never touch retrieval or
    /// generation, and an empty question is rejected before any work at all.
    pub async fn answer(
        &self,
        question: &str,
        rep_hint: Option<u32>,
    ) -> Result<FinalAnswer, QueryError> {
        if question.trim().is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        match classify(question, &self.roster) {
            Route::Compare { rep1, rep2 } => {
                let report = AnalyticsReport::Comparison(compare(&self.roster, &rep1, &rep2)?);
                Ok(compose_analytics(&report))
            }
            Route::Performance { rep } => {
                let report =
                    AnalyticsReport::Performance(performance_summary(&self.roster, &rep)?);
                Ok(compose_analytics(&report))
            }
            Route::General => self.answer_general(question, rep_hint).await,
        }
    }

    async fn answer_general(
        &self,
        question: &str,
        rep_hint: Option<u32>,
    ) -> Result<FinalAnswer, QueryError> {
        let query_vec = if self.config.embedding.is_enabled() && !self.index.is_empty() {
            match embed_query(&self.config.embedding, question).await {
                Ok(vec) => Some(vec),
                Err(err) => {
                    warn!("query embedding failed, falling back to exact matches: {err:#}");
                    None
                }
            }
        } else {
            None
        };

        let retrieval = retrieve(
            &self.index,
            &self.roster,
            question,
            query_vec.as_deref(),
            &self.config.retrieval.params(),
            rep_hint,
        );

        if retrieval.is_empty() {
            return Ok(insufficient_data());
        }

        let prompt = build_prompt(question, &retrieval);
        match generate(&self.config.generation, &prompt).await {
            Ok(text) => Ok(compose_general(text, &retrieval)),
            Err(err) => Err(QueryError::GenerationFailed {
                reason: format!("{err:#}"),
            }),
        }
    }
}

/// Stuff the retrieved context and the question into a single prompt.
fn build_prompt(question: &str, retrieval: &RetrievalResult) -> String {
    let context = retrieval
        .docs
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "You are an assistant for a sales team. Answer the question using only \
         the sales data below. If the data does not contain the answer, say so \
         plainly instead of guessing.\n\n\
         Sales data:\n{context}\n\n\
         Question: {question}\n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ChunkingConfig, DataConfig, EmbeddingConfig, GenerationConfig, RetrievalConfig,
        ServerConfig,
    };
    use salesdesk_core::compose::INSUFFICIENT_DATA_ANSWER;
    use salesdesk_core::models::{Deal, SalesRep};

    fn offline_config() -> Config {
        Config {
            data: DataConfig {
                path: "unused.json".into(),
            },
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            embedding: EmbeddingConfig::default(),
            generation: GenerationConfig::default(),
            server: ServerConfig::default(),
        }
    }

    fn roster() -> Arc<Roster> {
        let alice = SalesRep {
            id: 1,
            name: "Alice".to_string(),
            role: "Senior Rep".to_string(),
            region: "West".to_string(),
            skills: vec!["Negotiation".to_string()],
            deals: vec![
                Deal {
                    client: "Acme".to_string(),
                    value: 1000,
                    status: "Closed Won".to_string(),
                },
                Deal {
                    client: "Globex".to_string(),
                    value: 500,
                    status: "Closed Lost".to_string(),
                },
            ],
            clients: vec![],
        };
        let bob = SalesRep {
            id: 2,
            name: "Bob".to_string(),
            role: "Rep".to_string(),
            region: "East".to_string(),
            skills: vec![],
            deals: vec![],
            clients: vec![],
        };
        Arc::new(Roster::new(vec![alice, bob]).unwrap())
    }

    async fn service() -> DeskService {
        DeskService::build(offline_config(), roster()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_question_rejected_before_any_work() {
        let svc = service().await;
        assert!(matches!(
            svc.answer("   ", None).await.unwrap_err(),
            QueryError::EmptyQuestion
        ));
    }

    #[tokio::test]
    async fn test_compare_routes_to_analytics() {
        let svc = service().await;
        let answer = svc.answer("Compare Alice and Bob", None).await.unwrap();
        assert!(answer.answer.starts_with("Performance comparison:"));
        assert_eq!(answer.sources, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_performance_routes_to_analytics() {
        let svc = service().await;
        let answer = svc
            .answer("What is Alice's win rate?", None)
            .await
            .unwrap();
        assert!(answer.answer.contains("Win rate: 50.0%"));
        assert_eq!(answer.sources, vec!["Alice"]);
    }

    #[tokio::test]
    async fn test_general_with_no_matches_is_insufficient_data() {
        let svc = service().await;
        let answer = svc
            .answer("What is the weather today?", None)
            .await
            .unwrap();
        assert_eq!(answer.answer, INSUFFICIENT_DATA_ANSWER);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_general_with_context_but_no_generator_fails() {
        // Exact match finds Alice, so retrieval succeeds; the disabled
        // generation provider must then surface as a failed answer.
        let svc = service().await;
        let err = svc.answer("What does Alice do?", None).await.unwrap_err();
        assert!(matches!(err, QueryError::GenerationFailed { .. }));
    }

    #[tokio::test]
    async fn test_offline_build_has_empty_index() {
        let svc = service().await;
        assert!(svc.index.is_empty());
        assert_eq!(svc.roster().len(), 2);
    }

    #[test]
    fn test_prompt_contains_context_and_question() {
        let retrieval = RetrievalResult {
            docs: vec![salesdesk_core::retrieval::RetrievedDoc {
                rep_id: 1,
                rep_name: "Alice".to_string(),
                content: "Sales Rep: Alice".to_string(),
                relevance: salesdesk_core::retrieval::Relevance::ExactMatch,
            }],
        };
        let prompt = build_prompt("What does Alice do?", &retrieval);
        assert!(prompt.contains("Sales Rep: Alice"));
        assert!(prompt.contains("Question: What does Alice do?"));
    }
}
