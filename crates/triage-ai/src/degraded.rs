//! Last-resort classification computed from the input text alone.

use triage_core::ClassificationResult;

pub const HEURISTIC_CONFIDENCE: f64 = 0.3;

const BASE_TAGS: &[&str] = &["uncategorized", "transcript", "unclassified"];
const SHORT_BELOW_WORDS: usize = 100;
const LONG_ABOVE_WORDS: usize = 1000;
const SUMMARY_WORDS: usize = 50;
const MAX_TAGS: usize = 7;

/// Deterministic low-confidence result. No I/O, no parsing, cannot fail.
///
/// Tags are the fixed base set plus `short` (< 100 words) or `long`
/// (> 1000 words). The summary is the first 50 words, with `...` appended
/// when the text was longer.
pub fn heuristic_classification(text: &str) -> ClassificationResult {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    let mut tags: Vec<String> = BASE_TAGS.iter().map(|t| t.to_string()).collect();
    if word_count < SHORT_BELOW_WORDS {
        tags.push("short".into());
    } else if word_count > LONG_ABOVE_WORDS {
        tags.push("long".into());
    }
    tags.truncate(MAX_TAGS);

    let mut summary = words[..word_count.min(SUMMARY_WORDS)].join(" ");
    if word_count > SUMMARY_WORDS {
        summary.push_str("...");
    }

    ClassificationResult::new(tags, summary, HEURISTIC_CONFIDENCE)
}
