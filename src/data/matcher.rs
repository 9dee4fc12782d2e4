// ============================================================
// Layer 4 — Keyword-Overlap Matcher
// ============================================================
// Picks the chunk that shares the most distinct words with
// the question.
//
//   1. Lower-case the question and pull out every word token
//      (maximal run of letters, numbers or '_') into a set Q.
//      Combining marks and other connector punctuation split
//      tokens: "cafe\u{301}" → {"cafe"}, "x²" → {"x²"}
//   2. Do the same for each chunk → set C_i
//   3. score_i = |Q ∩ C_i|
//   4. Scan in order; replace the best only when a score is
//      STRICTLY greater. Ties keep the earlier chunk, and a
//      score of 0 never wins.
//
// Repeated words count once (set intersection). No stemming,
// no stop words, no fuzzy matching.
//
// Reference: Rust Book §8 (Hash Sets via HashMap/HashSet)
//            regex crate docs (Unicode general categories)

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::domain::answer::Answer;

// Letter (L*), number (N*) or underscore; narrower than the regex
// crate's `\w`, which also takes marks and connector punctuation
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("word pattern is a valid regex"));

/// The distinct lower-cased word tokens of `text`.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Number of distinct tokens shared by the two sets
fn overlap(question: &HashSet<String>, chunk: &HashSet<String>) -> usize {
    question.intersection(chunk).count()
}

/// Return the best-matching chunk as a typed Answer.
pub fn best_match<S: AsRef<str>>(question: &str, chunks: &[S]) -> Answer {
    let q_words = tokenize(question);

    let mut best: Option<(usize, usize)> = None;
    let mut max_matches = 0usize;

    for (i, chunk) in chunks.iter().enumerate() {
        let score = overlap(&q_words, &tokenize(chunk.as_ref()));
        if score > max_matches {
            max_matches = score;
            best        = Some((i, score));
        }
    }

    match best {
        Some((chunk_index, score)) => Answer::Found {
            chunk_index,
            score,
            text: chunks[chunk_index].as_ref().to_string(),
        },
        None => Answer::NotFound,
    }
}

/// Return the chunk with the most distinct words in common with
/// the question, or FALLBACK_ANSWER when no chunk shares any.
pub fn find_answer<S: AsRef<str>>(question: &str, chunks: &[S]) -> String {
    best_match(question, chunks).into_text()
}

/// Up to `top_k` `(chunk_index, score)` pairs with a positive
/// score, highest score first, earlier chunks first on ties.
///
/// The head of this list is always the chunk `find_answer` picks.
pub fn rank_chunks<S: AsRef<str>>(question: &str, chunks: &[S], top_k: usize) -> Vec<(usize, usize)> {
    let q_words = tokenize(question);

    let mut scored: Vec<(usize, usize)> = chunks
        .iter()
        .enumerate()
        .map(|(i, c)| (i, overlap(&q_words, &tokenize(c.as_ref()))))
        .filter(|&(_, score)| score > 0)
        .collect();

    // Stable sort keeps document order among equal scores
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(top_k);
    scored
}
