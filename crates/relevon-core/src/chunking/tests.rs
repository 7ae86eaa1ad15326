use super::sentence::naive_period_split;
use super::*;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[test]
fn test_empty_input_yields_no_chunks() {
    assert!(split_into_chunks("", 250).is_empty());
    assert!(split_into_chunks("   \n\t  ", 250).is_empty());
}

#[test]
fn test_single_short_sentence() {
    let chunks = split_into_chunks("The quick brown fox jumps over the lazy dog.", 250);
    assert_eq!(
        chunks,
        vec!["The quick brown fox jumps over the lazy dog.".to_string()]
    );
}

#[test]
fn test_sentences_packed_into_one_chunk_under_cap() {
    let text = "A cat sat. A dog ran. The stock market crashed today.";
    let chunks = split_into_chunks(text, 550);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], text);
}

#[test]
fn test_chunk_boundary_at_sentence_boundary() {
    let text = "This is the first sentence of the document. This is the second sentence of the document.";
    // Cap fits one sentence but not both.
    let chunks = split_into_chunks(text, 50);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0], "This is the first sentence of the document.");
    assert_eq!(chunks[1], "This is the second sentence of the document.");
}

#[test]
fn test_chunks_respect_cap_and_preserve_order() {
    let text = "One sentence here about cats. Another sentence here about dogs. \
                A third sentence here about birds. A fourth sentence here about fish. \
                A fifth sentence here about mice.";
    let chunks = split_into_chunks(text, 80);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(char_len(chunk) <= 80, "chunk over cap: {chunk:?}");
        assert!(char_len(chunk.trim()) >= MIN_CHUNK_CHARS);
    }

    // Chunks concatenate (modulo joining whitespace) to the original text.
    let rejoined = chunks.join(" ");
    let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(normalize(&rejoined), normalize(text));
}

#[test]
fn test_oversized_sentence_split_at_word_boundaries() {
    // One long sentence, no internal punctuation.
    let words: Vec<String> = (0..40).map(|i| format!("word{i:02}")).collect();
    let text = format!("{}.", words.join(" "));
    let chunks = split_into_chunks(&text, 60);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(char_len(chunk) <= 60, "chunk over cap: {chunk:?}");
    }
    // No word was cut in half.
    let rejoined = chunks.join(" ");
    for word in &words {
        assert!(rejoined.contains(word.as_str()));
    }
}

#[test]
fn test_single_word_over_cap_emitted_whole() {
    let long_word = "x".repeat(100);
    let text = format!("short intro words {long_word} trailing words here.");
    let chunks = split_into_chunks(&text, 40);

    assert!(
        chunks.iter().any(|c| c.contains(&long_word)),
        "oversized word should survive intact"
    );
}

#[test]
fn test_min_length_filter_drops_short_chunks() {
    // "Hi. Ok." segments into fragments all shorter than MIN_CHUNK_CHARS.
    let chunks = split_into_chunks("Hi. Ok.", 5);
    assert!(chunks.is_empty());
}

#[test]
fn test_filter_can_empty_a_nonempty_input() {
    let chunks = split_into_chunks("tiny.", 250);
    assert!(chunks.is_empty());
}

#[test]
fn test_no_terminal_punctuation_whole_text_one_sentence() {
    let text = "a text without any terminal punctuation at all";
    let (chunks, sentences) = split_with_sentences(text, 250);
    assert_eq!(sentences, vec![text.to_string()]);
    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn test_sentence_detection_basic() {
    let sentences = split_sentences("First one here. Second one there! Third one anywhere?");
    assert_eq!(
        sentences,
        vec![
            "First one here.".to_string(),
            "Second one there!".to_string(),
            "Third one anywhere?".to_string(),
        ]
    );
}

#[test]
fn test_sentence_detection_abbreviations() {
    let sentences = split_sentences("Dr. Smith arrived late. Mr. Jones had already left.");
    assert_eq!(
        sentences,
        vec![
            "Dr. Smith arrived late.".to_string(),
            "Mr. Jones had already left.".to_string(),
        ]
    );
}

#[test]
fn test_sentence_detection_initials() {
    let sentences = split_sentences("J. K. Rowling wrote the books. Everyone read them.");
    assert_eq!(
        sentences,
        vec![
            "J. K. Rowling wrote the books.".to_string(),
            "Everyone read them.".to_string(),
        ]
    );
}

#[test]
fn test_sentence_detection_decimals() {
    let sentences = split_sentences("The index fell 2.5 percent. Analysts were surprised.");
    assert_eq!(
        sentences,
        vec![
            "The index fell 2.5 percent.".to_string(),
            "Analysts were surprised.".to_string(),
        ]
    );
}

#[test]
fn test_sentence_detection_lowercase_continuation() {
    // A period followed by a lowercase word is not a sentence boundary.
    let sentences = split_sentences("They shipped v1. and then iterated. Nobody noticed.");
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[1], "Nobody noticed.");
}

#[test]
fn test_naive_period_split() {
    assert_eq!(
        naive_period_split("one. two.. three."),
        vec!["one".to_string(), "two".to_string(), "three".to_string()]
    );
    assert!(naive_period_split("...").is_empty());
}

#[test]
fn test_sentences_returned_as_diagnostics() {
    let (_, sentences) = split_with_sentences("A cat sat. A dog ran.", 550);
    assert_eq!(sentences.len(), 2);
}

#[test]
fn test_unicode_lengths_counted_in_chars() {
    // 30 two-byte chars; fits a 30-char cap even though it is 60 bytes.
    let text = "é".repeat(30);
    let chunks = split_into_chunks(&text, 30);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], text);
}
