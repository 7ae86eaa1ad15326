//! Relevon library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`RelevanceReport`], [`RelevanceLabel`], [`SensitivityReport`] - Scoring results
//! - [`TopicRelevanceScorer`], [`ScoringParams`] - The relevance pipeline
//!
//! ## Chunking
//! - [`split_into_chunks`], [`split_with_sentences`] - Sentence-bounded chunking
//! - [`split_sentences`] - Sentence boundary detection
//!
//! ## Embedding & Classification
//! - [`Embedder`], [`BertBiEncoder`], [`BiEncoderConfig`] - Unit-vector embeddings
//! - [`SensitivityModel`], [`BertSensitivityClassifier`], [`ClassifierConfig`] -
//!   Per-chunk sensitivity classification
//!
//! ## Utilities
//! - [`assets`] - Download-if-missing bootstrap for model files
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod assets;
pub mod chunking;
pub mod classify;
pub mod config;
pub mod embedding;
pub mod scoring;

pub use chunking::{MIN_CHUNK_CHARS, split_into_chunks, split_sentences, split_with_sentences};
#[cfg(any(test, feature = "mock"))]
pub use classify::MockSensitivityModel;
pub use classify::{
    BertSensitivityClassifier, ChunkClassification, ClassifierConfig, ClassifyError,
    SensitivityModel, SensitivityReport, aggregate_sensitivity,
};
pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{BertBiEncoder, BiEncoderConfig, Embedder, EmbeddingError};
pub use scoring::{
    DEFAULT_EVIDENCE_COUNT, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_RELEVANCE_THRESHOLD,
    DEFAULT_SENSITIVITY_THRESHOLD, LabelThresholds, METHOD_BI_ENCODER, METHOD_NONE,
    RelevanceLabel, RelevanceMetrics, RelevanceReport, SNIPPET_MAX_CHARS, ScoringParams,
    TopicRelevanceScorer, aggregate, cosine_similarity, determine_label, determine_label_with,
    select_evidence,
};
