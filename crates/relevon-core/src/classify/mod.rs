//! Per-chunk sensitivity (toxicity) classification.
//!
//! An optional collaborator of the relevance pipeline: when a classifier is
//! configured, every chunk gets a top `(label, score)` classification and the
//! scores are aggregated into a single [`SensitivityReport`]. Classifier
//! failure degrades to an empty result set (logged, never propagated).

/// BERT sequence classifier wrapper.
pub mod bert;
/// Classifier configuration.
pub mod config;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use bert::BertSensitivityClassifier;
pub use config::ClassifierConfig;
pub use error::ClassifyError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSensitivityModel;

/// Top classification for a single chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkClassification {
    /// Winning label (e.g. `"toxic"`).
    pub label: String,
    /// Confidence for that label, in [0, 1].
    pub score: f32,
}

/// Aggregated sensitivity verdict over all chunks of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Mean per-chunk score scaled to 0-100.
    pub sensitivity_score: f32,
    /// Chunk text to score, for chunks above the evidence threshold.
    /// `None` when no chunk crossed it.
    pub evidences: Option<BTreeMap<String, f32>>,
}

impl SensitivityReport {
    /// The all-clear report (also used when classification fails).
    pub fn empty() -> Self {
        Self {
            sensitivity_score: 0.0,
            evidences: None,
        }
    }
}

/// Capability: per-chunk text classification.
///
/// Safe to share read-only across concurrent requests.
pub trait SensitivityModel: Send + Sync {
    /// Returns the top `(label, score)` per text, in order.
    fn classify(&self, texts: &[&str]) -> Result<Vec<ChunkClassification>, ClassifyError>;
}

/// Folds per-chunk classifications into a [`SensitivityReport`].
///
/// `sensitivity_score` is the mean chunk score scaled to 0-100; chunks whose
/// score strictly exceeds `threshold` are surfaced in `evidences`. Empty
/// `results` yield [`SensitivityReport::empty`].
pub fn aggregate_sensitivity(
    chunks: &[String],
    results: &[ChunkClassification],
    threshold: f32,
) -> SensitivityReport {
    if results.is_empty() {
        return SensitivityReport::empty();
    }

    let mut total_score = 0.0f32;
    let mut evidences = BTreeMap::new();

    for (chunk, result) in chunks.iter().zip(results) {
        total_score += result.score;
        if result.score > threshold {
            evidences.insert(chunk.clone(), result.score);
        }
    }

    SensitivityReport {
        sensitivity_score: (total_score / results.len() as f32) * 100.0,
        evidences: (!evidences.is_empty()).then_some(evidences),
    }
}
