//! Skills coverage: how much of the JD's skill demand the resume meets

use crate::error::Result;
use crate::output::report::MissingSkill;
use crate::processing::ontology::SkillsOntology;
use crate::processing::term_extractor::TermMatcher;
use log::{debug, warn};

/// Weight given to every missing skill; terms are not differentiated yet
pub const DEFAULT_SKILL_IMPORTANCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsCoverage {
    /// Recall against the JD's skill terms, in [0, 1]
    pub score: f64,
    /// Sorted JD skills also present in the resume. When the JD names no
    /// known skill this holds the resume's own skills instead.
    pub aligned: Vec<String>,
    /// JD skills absent from the resume, sorted by term
    pub missing: Vec<MissingSkill>,
    /// False when the JD contained no ontology term and `score` is the 0.0 fallback
    pub jd_has_skills: bool,
}

pub fn skills_coverage(resume_text: &str, jd_text: &str, ontology: &SkillsOntology) -> Result<SkillsCoverage> {
    let matcher = TermMatcher::new(&ontology.vocabulary())?;
    Ok(coverage_with_matcher(&matcher, resume_text, jd_text))
}

/// Coverage against an already compiled skill vocabulary
pub fn coverage_with_matcher(matcher: &TermMatcher, resume_text: &str, jd_text: &str) -> SkillsCoverage {
    let jd_skills = matcher.find_terms(jd_text);
    let resume_skills = matcher.find_terms(resume_text);

    if jd_skills.is_empty() {
        warn!("Job description contains no known skill terms; skills coverage falls back to 0");
        return SkillsCoverage {
            score: 0.0,
            aligned: resume_skills.into_iter().collect(),
            missing: Vec::new(),
            jd_has_skills: false,
        };
    }

    let aligned: Vec<String> = jd_skills.intersection(&resume_skills).cloned().collect();
    let missing: Vec<MissingSkill> = jd_skills
        .difference(&resume_skills)
        .map(|term| MissingSkill {
            term: term.clone(),
            importance: DEFAULT_SKILL_IMPORTANCE,
        })
        .collect();

    let score = aligned.len() as f64 / jd_skills.len() as f64;
    debug!(
        "Skills coverage: {}/{} JD skills matched ({:.3})",
        aligned.len(),
        jd_skills.len(),
        score
    );

    SkillsCoverage {
        score,
        aligned,
        missing,
        jd_has_skills: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ontology() -> SkillsOntology {
        SkillsOntology::from_json_str(
            r#"{"languages": ["Python", "SQL", "Java"], "cloud": ["AWS", "Docker"]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_recall_against_jd_demand() {
        let coverage = skills_coverage(
            "Python, SQL, Java, AWS and Docker expert",
            "We need Python and AWS",
            &ontology(),
        )
        .unwrap();

        // extra resume skills are not penalized
        assert_eq!(coverage.score, 1.0);
        assert_eq!(coverage.aligned, vec!["AWS", "Python"]);
        assert!(coverage.missing.is_empty());
        assert!(coverage.jd_has_skills);
    }

    #[test]
    fn test_partial_coverage_lists_missing_sorted() {
        let coverage = skills_coverage(
            "Python developer",
            "Python, SQL and Docker required",
            &ontology(),
        )
        .unwrap();

        assert!((coverage.score - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(coverage.aligned, vec!["Python"]);
        assert_eq!(
            coverage.missing,
            vec![
                MissingSkill { term: "Docker".into(), importance: 1.0 },
                MissingSkill { term: "SQL".into(), importance: 1.0 },
            ]
        );
    }

    #[test]
    fn test_jd_without_known_skills_falls_back() {
        let coverage = skills_coverage(
            "Python and SQL engineer",
            "Friendly team player wanted",
            &ontology(),
        )
        .unwrap();

        assert_eq!(coverage.score, 0.0);
        assert_eq!(coverage.aligned, vec!["Python", "SQL"]);
        assert!(coverage.missing.is_empty());
        assert!(!coverage.jd_has_skills);
    }

    #[test]
    fn test_adding_matched_skill_never_decreases_coverage() {
        let resume = "Python, SQL and Docker";
        let base = skills_coverage(resume, "Java and AWS", &ontology()).unwrap();
        let extended = skills_coverage(resume, "Java and AWS and Docker", &ontology()).unwrap();

        assert_eq!(base.score, 0.0);
        assert!(extended.score >= base.score);
        assert!((extended.score - 1.0 / 3.0).abs() < 1e-12);
    }
}
