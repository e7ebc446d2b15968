//! Score report returned by the scoring engine

use serde::{Deserialize, Serialize};

/// Explainable compatibility score for one resume against one job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Weighted total, clamped to [0, 100] and rounded to one decimal
    pub total_score: f64,
    pub subscores: SubScores,
    /// Sorted skills found in both documents
    pub aligned_skills: Vec<String>,
    /// JD skills missing from the resume, sorted by term
    pub missing_skills: Vec<MissingSkill>,
    /// Sub-scores that fell back to 0.0 because there was nothing to compare
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoreWarning>,
}

/// Each component as a 0-100 percentage rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub embedding_similarity: f64,
    pub skills_coverage: f64,
    pub keyword_alignment: f64,
    pub evidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub term: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreWarning {
    /// Coverage is 0.0 because the JD names no ontology skill, not because none matched
    NoJobSkillTerms,
    /// Keyword alignment is 0.0 because the JD uses no tracked action verb
    NoJobActionVerbs,
    EmptyResume,
    EmptyJobDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreReport {
    pub fn band(&self) -> MatchBand {
        MatchBand::from_score(self.total_score)
    }

    pub fn has_warning(&self, warning: ScoreWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        match score.round() as i64 {
            s if s >= 80 => MatchBand::Excellent,
            s if s >= 60 => MatchBand::Good,
            s if s >= 40 => MatchBand::Fair,
            _ => MatchBand::NeedsWork,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Excellent => "EXCELLENT",
            MatchBand::Good => "GOOD",
            MatchBand::Fair => "FAIR",
            MatchBand::NeedsWork => "NEEDS WORK",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            MatchBand::Excellent => "Excellent match! Your resume aligns very well with this job.",
            MatchBand::Good => "Good match! Consider minor improvements for better alignment.",
            MatchBand::Fair => "Room for improvement. Focus on adding relevant skills and experience.",
            MatchBand::NeedsWork => "Significant improvements needed. Consider major resume updates.",
        }
    }
}

impl ScoreWarning {
    pub fn describe(&self) -> &'static str {
        match self {
            ScoreWarning::NoJobSkillTerms => {
                "The job description names no known skills; skills coverage is not meaningful"
            }
            ScoreWarning::NoJobActionVerbs => {
                "The job description uses no tracked action verbs; keyword alignment is not meaningful"
            }
            ScoreWarning::EmptyResume => "The resume is empty",
            ScoreWarning::EmptyJobDescription => "The job description is empty",
        }
    }
}
