//! Sentence-bounded text chunking.
//!
//! Turns raw text into an ordered sequence of chunks suitable for bi-encoder
//! comparison: sentences are packed greedily under a character budget, and a
//! sentence that alone exceeds the budget is re-split at word granularity.
//! Chunks shorter than [`MIN_CHUNK_CHARS`] after trimming are dropped, so a
//! non-empty input can legitimately produce an empty chunk sequence; callers
//! must treat that as "no scorable content".

pub mod sentence;

#[cfg(test)]
mod tests;

pub use sentence::split_sentences;

use tracing::debug;

/// Chunks shorter than this (in chars, after trimming) are discarded.
pub const MIN_CHUNK_CHARS: usize = 10;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Splits `text` into chunks of at most `max_chunk_chars` characters.
///
/// The cap is soft: a single word longer than `max_chunk_chars` is emitted
/// as its own oversized chunk rather than being cut mid-word.
pub fn split_into_chunks(text: &str, max_chunk_chars: usize) -> Vec<String> {
    split_with_sentences(text, max_chunk_chars).0
}

/// Like [`split_into_chunks`], but also returns the detected sentence list
/// as diagnostic output.
pub fn split_with_sentences(text: &str, max_chunk_chars: usize) -> (Vec<String>, Vec<String>) {
    let text = text.trim();
    if text.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let sentences = split_sentences(text);

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for sentence in &sentences {
        let potential = if current.is_empty() {
            sentence.clone()
        } else {
            format!("{current} {sentence}")
        };

        if char_len(&potential) <= max_chunk_chars {
            current = potential;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if char_len(sentence) <= max_chunk_chars {
            current = sentence.clone();
        } else {
            // Oversized sentence: re-run the same greedy accumulation at
            // word granularity. A single word over the cap still goes out
            // whole (the cap is soft there).
            let mut word_chunk = String::new();
            for word in sentence.split_whitespace() {
                let candidate = if word_chunk.is_empty() {
                    word.to_string()
                } else {
                    format!("{word_chunk} {word}")
                };

                if char_len(&candidate) <= max_chunk_chars {
                    word_chunk = candidate;
                } else {
                    if !word_chunk.is_empty() {
                        chunks.push(std::mem::take(&mut word_chunk));
                    }
                    word_chunk = word.to_string();
                }
            }
            current = word_chunk;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks.retain(|chunk| char_len(chunk.trim()) >= MIN_CHUNK_CHARS);

    debug!(
        sentence_count = sentences.len(),
        chunk_count = chunks.len(),
        max_chunk_chars,
        "text split into chunks"
    );

    (chunks, sentences)
}
