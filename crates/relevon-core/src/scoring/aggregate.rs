//! Score aggregation and labeling.

use super::types::{RelevanceLabel, RelevanceMetrics};

/// Label cutoffs over `(relevance_percentage, overall_score)`.
///
/// The percentage fields are on a 0-100 scale, the score fields on the raw
/// 0-1 cosine scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelThresholds {
    /// Below this percentage the document is not related, full stop.
    pub not_related_max_percentage: f32,
    /// Minimum percentage for `highly_related`.
    pub highly_min_percentage: f32,
    /// Minimum overall score for `highly_related`.
    pub highly_min_score: f32,
    /// Minimum percentage for `moderately_related`.
    pub moderately_min_percentage: f32,
    /// Minimum overall score for `moderately_related`.
    pub moderately_min_score: f32,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            not_related_max_percentage: 30.0,
            highly_min_percentage: 70.0,
            highly_min_score: 0.65,
            moderately_min_percentage: 50.0,
            moderately_min_score: 0.45,
        }
    }
}

/// Folds a per-chunk similarity array into [`RelevanceMetrics`].
///
/// `relevant_count` counts scores at or above `relevance_threshold`;
/// `overall_score` is the plain mean. An empty array yields
/// [`RelevanceMetrics::zero`].
pub fn aggregate(scores: &[f32], relevance_threshold: f32) -> RelevanceMetrics {
    if scores.is_empty() {
        return RelevanceMetrics::zero();
    }

    let relevant_count = scores.iter().filter(|&&s| s >= relevance_threshold).count();
    let relevance_percentage = (relevant_count as f32 / scores.len() as f32) * 100.0;
    let overall_score = scores.iter().sum::<f32>() / scores.len() as f32;

    RelevanceMetrics {
        overall_score,
        relevant_count,
        relevance_percentage,
    }
}

/// [`determine_label_with`] using the default thresholds.
pub fn determine_label(relevance_percentage: f32, overall_score: f32) -> RelevanceLabel {
    determine_label_with(relevance_percentage, overall_score, &LabelThresholds::default())
}

/// Maps `(relevance_percentage, overall_score)` to a label.
///
/// Ordered, first match wins; pure and total.
pub fn determine_label_with(
    relevance_percentage: f32,
    overall_score: f32,
    thresholds: &LabelThresholds,
) -> RelevanceLabel {
    if relevance_percentage < thresholds.not_related_max_percentage {
        RelevanceLabel::NotRelated
    } else if relevance_percentage >= thresholds.highly_min_percentage
        && overall_score >= thresholds.highly_min_score
    {
        RelevanceLabel::HighlyRelated
    } else if relevance_percentage >= thresholds.moderately_min_percentage
        && overall_score >= thresholds.moderately_min_score
    {
        RelevanceLabel::ModeratelyRelated
    } else {
        RelevanceLabel::PartiallyRelated
    }
}
