//! # Salesdesk
//!
//! A question answering service over sales team data. Natural-language
//! questions about reps, deals, and clients are routed deterministically:
//! numeric questions (performance summaries, rep comparisons) go to the
//! analytics engine and never near a language model; everything else goes
//! through hybrid retrieval (vector similarity + exact name lookup) and a
//! retrieval-augmented generation call.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌─────────────────┐   ┌───────────────┐
//! │ sales.json │──▶│ Roster + corpus  │──▶│ InMemoryIndex │
//! └────────────┘   │ (built at start) │   └──────┬────────┘
//!                  └─────────────────┘          │
//!            question ─▶ router ─┬─ analytics ──┤
//!                                └─ retrieve ───┴─▶ generate ─▶ answer+sources
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`loader`] | Read-once roster loading |
//! | [`embedding`] | External embedding providers (OpenAI, Ollama) |
//! | [`generation`] | External language-model providers (OpenAI, Ollama) |
//! | [`service`] | Corpus build + the `answer()` entry point |
//! | [`server`] | HTTP API |
//!
//! The engine itself — models, retrieval, analytics, routing — lives in the
//! `salesdesk-core` crate.

pub mod config;
pub mod embedding;
pub mod generation;
pub mod loader;
pub mod server;
pub mod service;
