//! Text scoring utilities for display surfaces.
//!
//! Pure, stateless helpers: a cheap extractive summary and a frequency
//! ranked topic list. Both strip lightweight markdown before scoring.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}\s+").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").unwrap());
static NUMBERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").unwrap());
static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// Words too common to count as topics.
const STOP_WORDS: &[&str] = &[
    "this", "that", "these", "those", "there", "their", "they", "them", "with", "from", "have",
    "having", "been", "were", "would", "could", "should", "about", "which", "when", "what",
    "where", "who", "whom", "whose", "your", "yours", "some", "will", "just", "very", "really",
];

/// Generate a short extractive summary of `text`.
///
/// Strips markdown, then keeps the first sentence, one from the middle,
/// and the last one; the result is truncated to `max_len` characters with
/// an ellipsis.
#[must_use]
pub fn summarize(text: &str, max_len: usize) -> String {
    let plain = strip_markdown(text);

    let sentences: Vec<&str> = plain
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect();

    // Short texts pass through whole.
    if sentences.len() <= 3 {
        return truncate(plain.trim(), max_len);
    }

    let mut key_points = vec![sentences[0]];
    if sentences.len() > 4 {
        key_points.push(sentences[sentences.len() / 2]);
    }
    key_points.push(sentences[sentences.len() - 1]);

    truncate(&key_points.join(". "), max_len)
}

/// Extract up to `max_topics` key topics from `text`.
///
/// Words shorter than four characters and stop words are ignored; the
/// rest rank by frequency, ties alphabetically.
#[must_use]
pub fn key_topics(text: &str, max_topics: usize) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for word in WORD_BOUNDARY.split(&lowered) {
        if word.len() > 3 && !STOP_WORDS.contains(&word) {
            *frequency.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(max_topics)
        .map(|(word, _)| word.to_string())
        .collect()
}

fn strip_markdown(text: &str) -> String {
    let text = HEADER.replace_all(text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = LIST_MARKER.replace_all(&text, "");
    NUMBERED_MARKER.replace_all(&text, "").into_owned()
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_short_text_passes_through() {
        assert_eq!(summarize("Buy milk. Call home.", 150), "Buy milk. Call home.");
    }

    #[test]
    fn test_summary_strips_markdown() {
        let summary = summarize("# Title\n**Bold** and *italic* and [link](https://x.y).", 150);
        assert_eq!(summary, "Title\nBold and italic and link.");
    }

    #[test]
    fn test_long_text_keeps_first_middle_last() {
        let text = "First point. Second. Third. Fourth. Last conclusion.";
        let summary = summarize(text, 150);
        assert!(summary.starts_with("First point"));
        assert!(summary.ends_with("Last conclusion"));
        assert!(summary.contains("Third"));
        assert!(!summary.contains("Second."));
    }

    #[test]
    fn test_summary_truncates_to_max_len() {
        let summary = summarize("abcdefghijklmnop", 10);
        assert_eq!(summary, "abcdefghij...");
    }

    #[test]
    fn test_topics_rank_by_frequency() {
        let topics = key_topics("kayak trip kayak gear kayak maps gear", 2);
        assert_eq!(topics, vec!["kayak", "gear"]);
    }

    #[test]
    fn test_topics_skip_short_and_stop_words() {
        let topics = key_topics("this would have been with just the cat", 5);
        assert!(topics.is_empty());
    }

    #[test]
    fn test_topics_tie_breaks_alphabetically() {
        let topics = key_topics("zebra apple", 5);
        assert_eq!(topics, vec!["apple", "zebra"]);
    }
}
