//! Sentence boundary detection.
//!
//! Rule-based detector over terminal punctuation (`.`, `!`, `?`) with
//! handling for abbreviations, initials, and decimals. When the detector
//! yields nothing the splitter falls back to a naive split on literal `.`
//! characters, and finally to the whole trimmed text as a single sentence.

/// Common abbreviations that do not terminate a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
    "corp", "no", "fig", "al", "approx", "dept", "est", "vol", "ca", "cf",
];

/// Splits `text` into an ordered sequence of sentences.
///
/// Guaranteed to return at least one sentence for non-empty (after trimming)
/// input; returns an empty vec for empty or whitespace-only input.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences = detect_sentences(text);

    if sentences.is_empty() {
        sentences = naive_period_split(text);
    }

    if sentences.is_empty() {
        sentences.push(text.to_string());
    }

    sentences
}

/// Fallback splitter: literal `.` boundaries, trimmed, empties dropped.
pub(crate) fn naive_period_split(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn detect_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if !matches!(chars[i].1, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        // Consume the punctuation run, then any attached closing quotes
        // or brackets.
        let mut j = i;
        let mut period_only = true;
        while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
            if chars[j].1 != '.' {
                period_only = false;
            }
            j += 1;
        }
        let punct_len = j - i;
        while j < chars.len()
            && matches!(chars[j].1, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
        {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |&(byte, _)| byte);
        let at_end = j >= chars.len();

        // Decimals ("2.5") and infix dots ("a.b.c") carry no following
        // whitespace and never terminate a sentence.
        if !at_end && !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        let mut k = j;
        while k < chars.len() && chars[k].1.is_whitespace() {
            k += 1;
        }

        let next_starts_sentence = match chars.get(k) {
            None => true,
            Some(&(_, next)) => {
                next.is_uppercase()
                    || next.is_ascii_digit()
                    || matches!(next, '"' | '\'' | '(' | '\u{201c}' | '\u{2018}')
            }
        };

        let abbreviation = period_only && punct_len == 1 && ends_with_abbreviation(&chars, i);

        let boundary = if period_only {
            next_starts_sentence && !abbreviation
        } else {
            // '!' and '?' terminate regardless of what follows.
            true
        };

        if boundary {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = chars.get(k).map_or(text.len(), |&(byte, _)| byte);
            i = k;
        } else {
            i = j;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Returns `true` if the word preceding the period at `dot_idx` is a known
/// abbreviation or a single-letter initial ("J. K. Rowling").
fn ends_with_abbreviation(chars: &[(usize, char)], dot_idx: usize) -> bool {
    let mut word: Vec<char> = Vec::new();
    let mut idx = dot_idx;
    while idx > 0 {
        let c = chars[idx - 1].1;
        if c.is_alphabetic() {
            word.push(c);
            idx -= 1;
        } else {
            break;
        }
    }
    if word.is_empty() {
        return false;
    }
    word.reverse();

    if word.len() == 1 && word[0].is_uppercase() {
        return true;
    }

    let lowered: String = word.iter().flat_map(|c| c.to_lowercase()).collect();
    ABBREVIATIONS.contains(&lowered.as_str())
}
