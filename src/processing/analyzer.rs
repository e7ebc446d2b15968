//! Score aggregation: runs the four scorers and combines them into one report

use crate::config::{Config, ScoringWeights};
use crate::error::Result;
use crate::output::report::{ScoreReport, ScoreWarning, SubScores};
use crate::processing::embeddings::{embedding_similarity, SentenceEncoder, SharedEncoder};
use crate::processing::evidence::evidence_score;
use crate::processing::keywords::{alignment_with_matcher, verb_matcher};
use crate::processing::ontology::SkillsOntology;
use crate::processing::skills::coverage_with_matcher;
use crate::processing::term_extractor::TermMatcher;
use crate::processing::text_processor::ProcessedText;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// The four sub-scores on their natural [0, 1] scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub embedding: f64,
    pub coverage: f64,
    pub keyword_alignment: f64,
    pub evidence: f64,
}

impl ComponentScores {
    /// Weighted total clamped to [0, 100] and rounded to one decimal
    pub fn total(&self, weights: &ScoringWeights) -> f64 {
        let total = weights.embedding * self.embedding
            + weights.coverage * self.coverage
            + weights.keyword_alignment * self.keyword_alignment
            + weights.evidence * self.evidence;
        round1(total).clamp(0.0, 100.0)
    }

    pub fn as_percentages(&self) -> SubScores {
        SubScores {
            embedding_similarity: percent(self.embedding),
            skills_coverage: percent(self.coverage),
            keyword_alignment: percent(self.keyword_alignment),
            evidence: percent(self.evidence),
        }
    }
}

/// One decimal place, exact ties to even (11.25 -> 11.2)
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn percent(unit: f64) -> f64 {
    round1(100.0 * unit.clamp(0.0, 1.0))
}

/// Scores one resume against one job description per call.
///
/// Holds no per-call state, so one engine can serve concurrent callers as
/// long as its encoder can.
pub struct ScoringEngine<'e> {
    encoder: &'e dyn SentenceEncoder,
    config: Config,
    verb_matcher: TermMatcher,
}

impl<'e> ScoringEngine<'e> {
    pub fn new(encoder: &'e dyn SentenceEncoder, config: Config) -> Result<Self> {
        config.validate()?;
        let verb_matcher = verb_matcher(&config.matching.action_verbs)?;
        Ok(Self {
            encoder,
            config,
            verb_matcher,
        })
    }

    /// Load the ontology at `ontology_path` and score.
    ///
    /// A missing or malformed ontology is returned as a configuration error
    /// before any text is processed.
    pub fn score_with_ontology_path(
        &self,
        resume_text: &str,
        jd_text: &str,
        ontology_path: &Path,
    ) -> Result<ScoreReport> {
        let ontology = SkillsOntology::load(ontology_path)?;
        self.score(resume_text, jd_text, &ontology)
    }

    pub fn score(&self, resume_text: &str, jd_text: &str, ontology: &SkillsOntology) -> Result<ScoreReport> {
        let start_time = Instant::now();

        let resume = ProcessedText::from_raw(resume_text);
        let jd = ProcessedText::from_raw(jd_text);

        let mut warnings = Vec::new();
        if resume.is_empty() {
            warnings.push(ScoreWarning::EmptyResume);
        }
        if jd.is_empty() {
            warnings.push(ScoreWarning::EmptyJobDescription);
        }

        let embedding = embedding_similarity(
            self.encoder,
            &resume.sentences,
            &jd.sentences,
            self.config.matching.top_k,
        )?;

        let skill_matcher = TermMatcher::new(&ontology.vocabulary())?;
        let coverage = coverage_with_matcher(&skill_matcher, &resume.cleaned, &jd.cleaned);
        if !coverage.jd_has_skills {
            warnings.push(ScoreWarning::NoJobSkillTerms);
        }

        let alignment = alignment_with_matcher(&self.verb_matcher, &resume.cleaned, &jd.cleaned);
        if !alignment.jd_has_verbs {
            warnings.push(ScoreWarning::NoJobActionVerbs);
        }

        let evidence = evidence_score(&resume.sentences);

        let components = ComponentScores {
            embedding,
            coverage: coverage.score,
            keyword_alignment: alignment.score,
            evidence,
        };
        debug!("Component scores: {:?}", components);

        let report = ScoreReport {
            total_score: components.total(&self.config.scoring),
            subscores: components.as_percentages(),
            aligned_skills: coverage.aligned,
            missing_skills: coverage.missing,
            warnings,
        };

        info!(
            "Scored resume ({} sentences) against JD ({} sentences): {} in {}ms",
            resume.sentences.len(),
            jd.sentences.len(),
            report.total_score,
            start_time.elapsed().as_millis()
        );

        Ok(report)
    }
}

/// Score with the default configuration and the process-wide embedding model
pub fn compute_score(resume_text: &str, jd_text: &str, ontology_path: impl AsRef<Path>) -> Result<ScoreReport> {
    compute_score_with_config(resume_text, jd_text, ontology_path, &Config::default())
}

pub fn compute_score_with_config(
    resume_text: &str,
    jd_text: &str,
    ontology_path: impl AsRef<Path>,
    config: &Config,
) -> Result<ScoreReport> {
    let encoder = SharedEncoder::new(config.model.embedding_model.clone());
    let engine = ScoringEngine::new(&encoder, config.clone())?;
    engine.score_with_ontology_path(resume_text, jd_text, ontology_path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatcherError;

    /// Every sentence maps to the same vector
    struct ConstantEncoder;

    impl SentenceEncoder for ConstantEncoder {
        fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(sentences.iter().map(|_| vec![0.6, 0.8]).collect())
        }

        fn model_name(&self) -> &str {
            "constant"
        }
    }

    fn ontology() -> SkillsOntology {
        SkillsOntology::from_json_str(r#"{"languages": ["Python", "SQL"], "cloud": ["AWS"]}"#).unwrap()
    }

    #[test]
    fn test_total_uses_weights() {
        let components = ComponentScores {
            embedding: 1.0,
            coverage: 1.0,
            keyword_alignment: 0.0,
            evidence: 1.0 / 3.0,
        };
        assert_eq!(components.total(&ScoringWeights::default()), 75.0);
        assert_eq!(
            components.as_percentages(),
            SubScores {
                embedding_similarity: 100.0,
                skills_coverage: 100.0,
                keyword_alignment: 0.0,
                evidence: 33.3,
            }
        );
    }

    #[test]
    fn test_total_is_clamped() {
        let components = ComponentScores {
            embedding: 1.0,
            coverage: 1.0,
            keyword_alignment: 1.0,
            evidence: 1.0,
        };
        let heavy = ScoringWeights {
            embedding: 100.0,
            coverage: 100.0,
            keyword_alignment: 0.0,
            evidence: 0.0,
        };
        assert_eq!(components.total(&heavy), 100.0);
    }

    #[test]
    fn test_rounding_ties_go_to_even() {
        let components = ComponentScores {
            embedding: 0.0,
            coverage: 0.0,
            keyword_alignment: 0.0,
            evidence: 0.75,
        };
        assert_eq!(components.total(&ScoringWeights::default()), 11.2);
        assert_eq!(round1(0.25), 0.2);
        assert_eq!(round1(0.75), 0.8);
        assert_eq!(round1(33.333), 33.3);
    }

    #[test]
    fn test_empty_verb_list_uses_defaults() {
        let mut config = Config::default();
        config.matching.action_verbs = Vec::new();
        let engine = ScoringEngine::new(&ConstantEncoder, config).unwrap();
        let report = engine
            .score(
                "Built and deployed services.",
                "Engineer who built and deployed services.",
                &ontology(),
            )
            .unwrap();

        assert_eq!(report.subscores.keyword_alignment, 100.0);
        assert!(!report.has_warning(ScoreWarning::NoJobActionVerbs));
    }

    #[test]
    fn test_score_report() {
        let engine = ScoringEngine::new(&ConstantEncoder, Config::default()).unwrap();
        let report = engine
            .score(
                "Built a pipeline in Python. Reduced cost by 15%.",
                "Python and AWS engineer who built pipelines.",
                &ontology(),
            )
            .unwrap();

        assert_eq!(report.subscores.embedding_similarity, 100.0);
        assert_eq!(report.subscores.skills_coverage, 50.0);
        assert_eq!(report.subscores.keyword_alignment, 100.0);
        assert_eq!(report.subscores.evidence, 50.0);
        // 40 + 15 + 15 + 7.5
        assert_eq!(report.total_score, 77.5);
        assert_eq!(report.aligned_skills, vec!["Python"]);
        assert_eq!(report.missing_skills.len(), 1);
        assert_eq!(report.missing_skills[0].term, "AWS");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_inputs_are_not_errors() {
        let engine = ScoringEngine::new(&ConstantEncoder, Config::default()).unwrap();
        let report = engine.score("", "", &ontology()).unwrap();

        assert_eq!(report.total_score, 0.0);
        assert!(report.has_warning(ScoreWarning::EmptyResume));
        assert!(report.has_warning(ScoreWarning::EmptyJobDescription));
        assert!(report.has_warning(ScoreWarning::NoJobSkillTerms));
        assert!(report.has_warning(ScoreWarning::NoJobActionVerbs));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.scoring.evidence = 0.0;
        assert!(matches!(
            ScoringEngine::new(&ConstantEncoder, config),
            Err(MatcherError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_ontology_propagates() {
        let engine = ScoringEngine::new(&ConstantEncoder, Config::default()).unwrap();
        let result = engine.score_with_ontology_path("a", "b", Path::new("missing/ontology.json"));
        assert!(matches!(result, Err(MatcherError::Configuration(_))));
    }
}
