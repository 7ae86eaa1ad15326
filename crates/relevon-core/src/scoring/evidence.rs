//! Evidence snippet selection.

use std::cmp::Ordering;

/// Evidence snippets are truncated to this many characters.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Picks the top-`evidence_count` `(score, snippet)` pairs.
///
/// Sorted descending by score; ties keep original chunk order. The count is
/// clamped to the number of chunks. Snippets over [`SNIPPET_MAX_CHARS`]
/// characters are truncated with an ellipsis appended.
pub fn select_evidence(
    scores: &[f32],
    chunks: &[String],
    evidence_count: usize,
) -> Vec<(f32, String)> {
    debug_assert_eq!(scores.len(), chunks.len());

    let mut indices: Vec<usize> = (0..scores.len().min(chunks.len())).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    indices.truncate(evidence_count.min(chunks.len()));

    indices
        .into_iter()
        .map(|i| (scores[i], snippet(&chunks[i])))
        .collect()
}

fn snippet(chunk: &str) -> String {
    if chunk.chars().count() > SNIPPET_MAX_CHARS {
        let mut truncated: String = chunk.chars().take(SNIPPET_MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        chunk.to_string()
    }
}
