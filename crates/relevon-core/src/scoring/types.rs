use serde::{Deserialize, Serialize};

use crate::classify::SensitivityReport;

/// Method tag for reports produced by bi-encoder scoring.
pub const METHOD_BI_ENCODER: &str = "bi_encoder";

/// Method tag for the short-circuit report (no scorable content).
pub const METHOD_NONE: &str = "none";

/// Categorical relevance verdict.
///
/// A pure function of `(relevance_percentage, overall_score)` — see
/// [`determine_label`](crate::scoring::determine_label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceLabel {
    NotRelated,
    PartiallyRelated,
    ModeratelyRelated,
    HighlyRelated,
}

impl std::fmt::Display for RelevanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelevanceLabel::NotRelated => "not_related",
            RelevanceLabel::PartiallyRelated => "partially_related",
            RelevanceLabel::ModeratelyRelated => "moderately_related",
            RelevanceLabel::HighlyRelated => "highly_related",
        };
        f.write_str(s)
    }
}

/// Numeric aggregation over a per-chunk similarity array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceMetrics {
    /// Mean similarity over all chunks, 0-1 scale.
    pub overall_score: f32,
    /// Chunks at or above the relevance threshold.
    pub relevant_count: usize,
    /// `100 * relevant_count / total_count`.
    pub relevance_percentage: f32,
}

impl RelevanceMetrics {
    /// The zero metrics (empty score array).
    pub fn zero() -> Self {
        Self {
            overall_score: 0.0,
            relevant_count: 0,
            relevance_percentage: 0.0,
        }
    }
}

/// Full relevance verdict for one document/topic pair.
///
/// Serialized as-is as the HTTP response body. Built fresh per request,
/// immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Mean cosine similarity over all chunks, 0-1 scale.
    pub overall_score: f32,
    /// Percentage of chunks at or above the relevance threshold.
    pub relevance_percentage: f32,
    /// Categorical verdict.
    pub label: RelevanceLabel,
    /// `(score, snippet)` pairs, highest score first; snippets are capped at
    /// [`SNIPPET_MAX_CHARS`](crate::scoring::SNIPPET_MAX_CHARS) characters.
    pub evidence: Vec<(f32, String)>,
    /// Total chunks scored.
    pub chunk_count: usize,
    /// Chunks at or above the relevance threshold.
    pub relevance_chunk_count: usize,
    /// `"bi_encoder"`, or `"none"` when there was no scorable content.
    pub method_used: String,
    /// Sensitivity sub-result, present only when a classifier is configured.
    pub sensitivity: Option<SensitivityReport>,
}

impl RelevanceReport {
    /// The short-circuit report for input with no scorable chunks.
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            relevance_percentage: 0.0,
            label: RelevanceLabel::NotRelated,
            evidence: Vec::new(),
            chunk_count: 0,
            relevance_chunk_count: 0,
            method_used: METHOD_NONE.to_string(),
            sensitivity: None,
        }
    }
}
