//! Evidence scoring: how many resume sentences carry a quantifiable metric

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// A percentage, a currency-like number (optional `$`, optional k/m suffix),
/// or an integer followed by a time unit
static METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(\.\d+)?%|\$?\d+[kKmM]?|\b\d+\b (days?|weeks?|months?|hours?)")
        .expect("Invalid metric regex")
});

pub fn is_evidence_bearing(sentence: &str) -> bool {
    METRIC.is_match(sentence)
}

/// Fraction of sentences that are evidence-bearing, 0.0 for no sentences
pub fn evidence_score<S: AsRef<str>>(sentences: &[S]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }

    let with_metrics = sentences
        .iter()
        .filter(|s| is_evidence_bearing(s.as_ref()))
        .count();
    debug!("Evidence: {}/{} sentences carry metrics", with_metrics, sentences.len());

    (with_metrics as f64 / sentences.len() as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_of_sentences_have_metrics() {
        let score = evidence_score(&["Grew revenue by 20%.", "Led a team."]);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_metric_shapes() {
        assert!(is_evidence_bearing("Cut latency by 12.5%"));
        assert!(is_evidence_bearing("Saved $40k annually"));
        assert!(is_evidence_bearing("Managed a 3M budget"));
        assert!(is_evidence_bearing("Delivered in 6 weeks"));
        assert!(is_evidence_bearing("On call for 1 day"));
        assert!(!is_evidence_bearing("Mentored junior engineers"));
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(evidence_score(&empty), 0.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let score = evidence_score(&["1", "2", "3"]);
        assert_eq!(score, 1.0);
    }
}
