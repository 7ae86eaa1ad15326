use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::chunking::split_into_chunks;
use crate::classify::{SensitivityModel, aggregate_sensitivity};
use crate::embedding::Embedder;

use super::aggregate::{LabelThresholds, aggregate, determine_label_with};
use super::evidence::select_evidence;
use super::types::{METHOD_BI_ENCODER, RelevanceReport};
use super::{
    DEFAULT_EVIDENCE_COUNT, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_RELEVANCE_THRESHOLD,
    DEFAULT_SENSITIVITY_THRESHOLD,
};

/// Tunables for one scorer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Soft cap on chunk length, in characters.
    pub max_chunk_chars: usize,
    /// Cosine similarity at or above which a chunk counts as relevant.
    pub relevance_threshold: f32,
    /// Number of evidence snippets per report.
    pub evidence_count: usize,
    /// Sensitivity score above which a chunk is surfaced as evidence.
    pub sensitivity_threshold: f32,
    /// Label cutoffs.
    pub label_thresholds: LabelThresholds,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            evidence_count: DEFAULT_EVIDENCE_COUNT,
            sensitivity_threshold: DEFAULT_SENSITIVITY_THRESHOLD,
            label_thresholds: LabelThresholds::default(),
        }
    }
}

/// Orchestrates chunking, bi-encoder scoring, aggregation, evidence
/// selection, and optional sensitivity classification.
///
/// Built once at startup and shared read-only across requests; the models it
/// holds perform stateless inference after load.
pub struct TopicRelevanceScorer {
    embedder: Arc<dyn Embedder>,
    classifier: Option<Arc<dyn SensitivityModel>>,
    params: ScoringParams,
}

impl std::fmt::Debug for TopicRelevanceScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicRelevanceScorer")
            .field("has_classifier", &self.classifier.is_some())
            .field("params", &self.params)
            .finish()
    }
}

impl TopicRelevanceScorer {
    /// Creates a scorer with default parameters.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            classifier: None,
            params: ScoringParams::default(),
        }
    }

    /// Replaces the parameters.
    pub fn with_params(mut self, params: ScoringParams) -> Self {
        self.params = params;
        self
    }

    /// Attaches a sensitivity classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn SensitivityModel>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Returns the active parameters.
    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Returns `true` if a sensitivity classifier is attached.
    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Returns `true` if the embedder runs without a real model.
    pub fn is_embedder_stub(&self) -> bool {
        self.embedder.is_stub()
    }

    /// Runs the full pipeline for one document/topic pair.
    ///
    /// Never fails: ML errors degrade to zero scores or empty
    /// classifications, and the report stays structurally valid.
    pub fn score_relevance(&self, text: &str, topic: &str) -> RelevanceReport {
        info!(topic, "analyzing relevance");

        let chunks = split_into_chunks(text, self.params.max_chunk_chars);
        if chunks.is_empty() {
            debug!("no scorable content after chunking");
            return RelevanceReport::empty();
        }

        let scores = self.score_chunks(&chunks, topic);

        let metrics = aggregate(&scores, self.params.relevance_threshold);
        let label = determine_label_with(
            metrics.relevance_percentage,
            metrics.overall_score,
            &self.params.label_thresholds,
        );
        let evidence = select_evidence(&scores, &chunks, self.params.evidence_count);
        let sensitivity = self.classify_sensitivity(&chunks);

        info!(
            overall_score = metrics.overall_score,
            relevance_percentage = metrics.relevance_percentage,
            label = %label,
            chunk_count = chunks.len(),
            "analysis complete"
        );

        RelevanceReport {
            overall_score: metrics.overall_score,
            relevance_percentage: metrics.relevance_percentage,
            label,
            evidence,
            chunk_count: chunks.len(),
            relevance_chunk_count: metrics.relevant_count,
            method_used: METHOD_BI_ENCODER.to_string(),
            sensitivity,
        }
    }

    /// Cosine similarity of every chunk against the topic, index-aligned.
    ///
    /// Embedding failure degrades to an all-zero array of the same length;
    /// callers cannot distinguish that from a fully unrelated topic here —
    /// the warning log is the only signal.
    pub fn score_chunks(&self, chunks: &[String], topic: &str) -> Vec<f32> {
        let mut texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        texts.push(topic);

        let embeddings = match self.embedder.embed_batch(&texts) {
            Ok(embeddings) => embeddings,
            Err(e) => {
                warn!(error = %e, "bi-encoder scoring failed, degrading to zero scores");
                return vec![0.0; chunks.len()];
            }
        };

        // The topic embedding rides along as the last batch element.
        let Some((topic_embedding, chunk_embeddings)) = embeddings.split_last() else {
            return vec![0.0; chunks.len()];
        };

        chunk_embeddings
            .iter()
            .map(|chunk_embedding| cosine_similarity(chunk_embedding, topic_embedding))
            .collect()
    }

    fn classify_sensitivity(&self, chunks: &[String]) -> Option<crate::classify::SensitivityReport> {
        let classifier = self.classifier.as_ref()?;

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let results = match classifier.classify(&texts) {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "sensitivity classification failed");
                Vec::new()
            }
        };

        Some(aggregate_sensitivity(
            chunks,
            &results,
            self.params.sensitivity_threshold,
        ))
    }
}

/// Cosine similarity between two vectors (0.0 when either has zero norm).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
