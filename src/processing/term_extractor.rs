//! Boundary-aware vocabulary term extraction

use crate::error::{MatcherError, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Separator accepted wherever a multi-word term has a space
const TERM_SEPARATOR: &str = r"[ .\-]";

/// Precompiled matcher for a fixed vocabulary.
///
/// A term matches only when it is not glued to a word character or hyphen on
/// either side, so `java` never matches inside `javascript`. Matching runs on a
/// lowercased copy of the text; results keep the vocabulary's own casing.
pub struct TermMatcher {
    patterns: Vec<(String, Regex)>,
}

impl TermMatcher {
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(vocabulary.len());

        for term in vocabulary {
            let term = term.as_ref();
            let normalized = term.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }

            let pattern = normalized
                .split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(TERM_SEPARATOR);
            let regex = Regex::new(&pattern).map_err(|e| {
                MatcherError::InvalidInput(format!("Failed to build pattern for term '{}': {}", term, e))
            })?;

            patterns.push((term.to_string(), regex));
        }

        Ok(Self { patterns })
    }

    /// Vocabulary terms present at least once in `text`
    pub fn find_terms(&self, text: &str) -> BTreeSet<String> {
        if text.is_empty() {
            return BTreeSet::new();
        }

        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|(_, regex)| has_bounded_match(regex, &lowered))
            .map(|(term, _)| term.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// One-shot extraction for callers that do not reuse the vocabulary
pub fn find_terms<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> Result<BTreeSet<String>> {
    Ok(TermMatcher::new(vocabulary)?.find_terms(text))
}

fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn has_bounded_match(regex: &Regex, text: &str) -> bool {
    let mut start = 0;

    while start <= text.len() {
        let Some(mat) = regex.find_at(text, start) else {
            return false;
        };

        let clear_before = text[..mat.start()]
            .chars()
            .next_back()
            .map_or(true, |c| !is_term_char(c));
        let clear_after = text[mat.end()..]
            .chars()
            .next()
            .map_or(true, |c| !is_term_char(c));
        if clear_before && clear_after {
            return true;
        }

        // retry one character further so overlapping candidates are not skipped
        start = mat.start() + text[mat.start()..].chars().next().map_or(1, char::len_utf8);
    }

    false
}
