//! Text normalization and sentence segmentation

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Sentence-terminal punctuation followed by whitespace
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("Invalid sentence break regex"));

/// A document normalized once and split into sentences
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedText {
    pub cleaned: String,
    pub sentences: Vec<String>,
}

impl ProcessedText {
    pub fn from_raw(text: &str) -> Self {
        let cleaned = clean_text(text);
        let sentences = split_sentences(&cleaned);
        Self { cleaned, sentences }
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }
}

/// Collapse every whitespace run (newlines included) to one space and trim
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Split on `.`, `!` or `?` followed by whitespace.
///
/// The punctuation stays attached to the sentence it ends. Fragments are
/// trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for mat in SENTENCE_BREAK.find_iter(text) {
        // terminal punctuation is a single ASCII byte
        push_fragment(&mut sentences, &text[start..mat.start() + 1]);
        start = mat.end();
    }
    push_fragment(&mut sentences, &text[start..]);

    sentences
}

fn push_fragment(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let text = "  Built   a\tdata\n\npipeline.\r\n  ";
        assert_eq!(clean_text(text), "Built a data pipeline.");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t "), "");
    }

    #[test]
    fn test_split_sentences_keeps_punctuation() {
        let sentences = split_sentences("Built a pipeline. Reduced cost by 15%! Is it fast? Yes");
        assert_eq!(
            sentences,
            vec!["Built a pipeline.", "Reduced cost by 15%!", "Is it fast?", "Yes"]
        );
    }

    #[test]
    fn test_split_sentences_requires_whitespace_after_punctuation() {
        // decimals and dotted names are not sentence breaks
        let sentences = split_sentences("Used node.js and v2.5 daily. Shipped it.");
        assert_eq!(sentences, vec!["Used node.js and v2.5 daily.", "Shipped it."]);
    }

    #[test]
    fn test_split_sentences_drops_empty_fragments() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert_eq!(split_sentences("Done.   "), vec!["Done."]);
    }

    #[test]
    fn test_split_is_repeatable() {
        let text = "One. Two. Three.";
        assert_eq!(split_sentences(text), split_sentences(text));
    }

    #[test]
    fn test_processed_text() {
        let processed = ProcessedText::from_raw("Led a team.\n\nGrew revenue by 20%.");
        assert_eq!(processed.cleaned, "Led a team. Grew revenue by 20%.");
        assert_eq!(processed.sentences.len(), 2);
        assert!(ProcessedText::from_raw("\n").is_empty());
    }
}
