//! # Salesdesk Core
//!
//! The engine behind Salesdesk: data model, Record Store, document corpus,
//! hybrid retrieval, deterministic analytics, query routing, and answer
//! composition.
//!
//! This crate contains no network, database, or runtime dependencies. The
//! external capabilities — embedding, vector storage beyond the bundled
//! in-memory index, and text generation — are consumed through narrow seams
//! ([`index::VectorIndex`], pre-computed query vectors, generated text passed
//! into [`compose`]), so the whole engine is testable offline.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Roster data types and per-rep metric helpers |
//! | [`roster`] | Validated, immutable Record Store with query operations |
//! | [`document`] | Rep → document flattening and overlapping chunking |
//! | [`index`] | Vector index seam + brute-force in-memory implementation |
//! | [`retrieval`] | Hybrid retrieval (vector hits ∪ exact name matches) |
//! | [`analytics`] | Win rate, pipeline value, status counts, comparisons |
//! | [`router`] | Deterministic question classification |
//! | [`compose`] | Final answer assembly with source attribution |
//! | [`error`] | Query error taxonomy |

pub mod analytics;
pub mod compose;
pub mod document;
pub mod error;
pub mod index;
pub mod models;
pub mod retrieval;
pub mod roster;
pub mod router;
