//! Resume matcher library
//!
//! Scores one resume against one job description with four explainable
//! signals: semantic similarity, skills coverage, action verb alignment and
//! quantified evidence.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use output::report::{MissingSkill, ScoreReport, ScoreWarning, SubScores};
pub use processing::analyzer::{compute_score, compute_score_with_config, ScoringEngine};
