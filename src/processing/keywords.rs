//! Achievement verb alignment between resume and job description

use crate::error::Result;
use crate::processing::term_extractor::TermMatcher;
use log::{debug, warn};

pub const DEFAULT_ACTION_VERBS: [&str; 20] = [
    "built",
    "designed",
    "automated",
    "optimized",
    "deployed",
    "analyzed",
    "modeled",
    "visualized",
    "orchestrated",
    "led",
    "improved",
    "reduced",
    "increased",
    "streamlined",
    "migrated",
    "integrated",
    "refactored",
    "monitored",
    "tested",
    "validated",
];

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordAlignment {
    /// Share of the JD's action verbs the resume also uses, in [0, 1]
    pub score: f64,
    pub matched_verbs: Vec<String>,
    /// False when the JD used none of the tracked verbs and `score` is the 0.0 fallback
    pub jd_has_verbs: bool,
}

/// Align against a caller supplied verb list, or the defaults when `None`
pub fn keyword_alignment(resume_text: &str, jd_text: &str, verbs: Option<&[String]>) -> Result<KeywordAlignment> {
    let matcher = verb_matcher(verbs.unwrap_or_default())?;
    Ok(alignment_with_matcher(&matcher, resume_text, jd_text))
}

/// Compile `verbs`, falling back to the defaults when no verb is usable
pub fn verb_matcher(verbs: &[String]) -> Result<TermMatcher> {
    if verbs.iter().all(|verb| verb.trim().is_empty()) {
        TermMatcher::new(&DEFAULT_ACTION_VERBS)
    } else {
        TermMatcher::new(verbs)
    }
}

pub fn alignment_with_matcher(matcher: &TermMatcher, resume_text: &str, jd_text: &str) -> KeywordAlignment {
    let jd_verbs = matcher.find_terms(jd_text);
    if jd_verbs.is_empty() {
        warn!("Job description uses none of the tracked action verbs; keyword alignment falls back to 0");
        return KeywordAlignment {
            score: 0.0,
            matched_verbs: Vec::new(),
            jd_has_verbs: false,
        };
    }

    let resume_verbs = matcher.find_terms(resume_text);
    let matched_verbs: Vec<String> = resume_verbs.intersection(&jd_verbs).cloned().collect();
    let score = matched_verbs.len() as f64 / jd_verbs.len() as f64;
    debug!("Keyword alignment: {:?} of {} JD verbs ({:.3})", matched_verbs, jd_verbs.len(), score);

    KeywordAlignment {
        score,
        matched_verbs,
        jd_has_verbs: true,
    }
}
