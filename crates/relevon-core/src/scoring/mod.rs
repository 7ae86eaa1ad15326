//! The relevance pipeline: chunk, score, aggregate, pick evidence.
//!
//! [`TopicRelevanceScorer`] composes [`crate::chunking`], an injected
//! [`Embedder`](crate::embedding::Embedder), and an optional
//! [`SensitivityModel`](crate::classify::SensitivityModel) into one
//! `score_relevance(text, topic)` call. ML failures degrade (all-zero scores,
//! empty classifications) instead of propagating, so the pipeline always
//! produces a structurally valid [`RelevanceReport`].
//!
//! Scale convention: `overall_score` is the raw mean cosine similarity on a
//! 0-1 scale, end to end. The label thresholds below assume that scale.

pub mod aggregate;
pub mod evidence;
pub mod scorer;
pub mod types;


pub use aggregate::{
    LabelThresholds, aggregate, determine_label, determine_label_with,
};
pub use evidence::{SNIPPET_MAX_CHARS, select_evidence};
pub use scorer::{ScoringParams, TopicRelevanceScorer, cosine_similarity};
pub use types::{
    METHOD_BI_ENCODER, METHOD_NONE, RelevanceLabel, RelevanceMetrics, RelevanceReport,
};

pub use crate::classify::SensitivityReport;

/// Default soft cap on chunk length, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 250;

/// Default cosine similarity at or above which a chunk counts as relevant.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.35;

/// Default number of evidence snippets per report.
pub const DEFAULT_EVIDENCE_COUNT: usize = 5;

/// Default sensitivity score above which a chunk is surfaced as evidence.
pub const DEFAULT_SENSITIVITY_THRESHOLD: f32 = 0.4;
