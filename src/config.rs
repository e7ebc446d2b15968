//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use crate::processing::keywords::DEFAULT_ACTION_VERBS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Total the four scoring weights must add up to
pub const WEIGHT_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub model: ModelConfig,
    pub scoring: ScoringWeights,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Hugging Face repo id or local folder of a Model2Vec model
    pub embedding_model: String,
}

/// Fixed linear weighting of the four sub-scores.
///
/// Each weight multiplies a sub-score on its natural [0, 1] scale, so the
/// weights together define the 0-100 total. They must sum to [`WEIGHT_SCALE`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    pub embedding: f64,
    pub coverage: f64,
    pub keyword_alignment: f64,
    pub evidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchingConfig {
    /// Number of best JD sentences credited to each resume sentence
    pub top_k: usize,
    pub action_verbs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub max_skill_chips: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            embedding: 40.0,
            coverage: 30.0,
            keyword_alignment: 15.0,
            evidence: 15.0,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.embedding + self.coverage + self.keyword_alignment + self.evidence
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("embedding", self.embedding),
            ("coverage", self.coverage),
            ("keyword_alignment", self.keyword_alignment),
            ("evidence", self.evidence),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "scoring weight '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if (self.sum() - WEIGHT_SCALE).abs() > 1e-6 {
            return Err(MatcherError::Configuration(format!(
                "scoring weights must sum to {}, got {}",
                WEIGHT_SCALE,
                self.sum()
            )));
        }
        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            action_verbs: DEFAULT_ACTION_VERBS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                embedding_model: "minishlab/potion-base-8M".to_string(),
            },
            scoring: ScoringWeights::default(),
            matching: MatchingConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                max_skill_chips: 20,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatcherError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if self.matching.top_k == 0 {
            return Err(MatcherError::Configuration("matching.top_k must be at least 1".to_string()));
        }
        if self.model.embedding_model.trim().is_empty() {
            return Err(MatcherError::Configuration("model.embedding_model is empty".to_string()));
        }
        Ok(())
    }

    /// Set a single value by dotted key, e.g. `scoring.embedding`.
    ///
    /// Weights are only validated as a whole by [`Config::validate`], so a
    /// single weight change must be balanced by another before saving, or all
    /// four set at once through `scoring.weights` ("40,30,15,15").
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "scoring.weights" => {
                let parts = value
                    .split(',')
                    .map(|part| parse_value::<f64>(key, part))
                    .collect::<Result<Vec<_>>>()?;
                let &[embedding, coverage, keyword_alignment, evidence] = parts.as_slice() else {
                    return Err(MatcherError::Configuration(format!(
                        "{} expects four comma-separated weights, got '{}'",
                        key, value
                    )));
                };
                self.scoring = ScoringWeights {
                    embedding,
                    coverage,
                    keyword_alignment,
                    evidence,
                };
            }
            "model.embedding_model" => self.model.embedding_model = value.to_string(),
            "scoring.embedding" => self.scoring.embedding = parse_value(key, value)?,
            "scoring.coverage" => self.scoring.coverage = parse_value(key, value)?,
            "scoring.keyword_alignment" => self.scoring.keyword_alignment = parse_value(key, value)?,
            "scoring.evidence" => self.scoring.evidence = parse_value(key, value)?,
            "matching.top_k" => self.matching.top_k = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.max_skill_chips" => self.output.max_skill_chips = parse_value(key, value)?,
            "output.format" => {
                self.output.format = match value.to_lowercase().as_str() {
                    "console" => OutputFormat::Console,
                    "json" => OutputFormat::Json,
                    "markdown" | "md" => OutputFormat::Markdown,
                    other => {
                        return Err(MatcherError::Configuration(format!(
                            "Invalid output format: {}",
                            other
                        )))
                    }
                }
            }
            _ => {
                return Err(MatcherError::Configuration(format!("Unknown configuration key: {}", key)))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MatcherError::Configuration(format!("Invalid value for {}: {}", key, value)))
}
