//! Skills ontology: category label -> list of skill terms

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Controlled skill vocabulary grouped by free-form category labels.
///
/// Only one shape is accepted: a JSON object whose values are arrays of
/// strings. Categories matter only for presentation; scoring works on the
/// flattened [`SkillsOntology::vocabulary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillsOntology {
    categories: BTreeMap<String, Vec<String>>,
}

impl SkillsOntology {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatcherError::Configuration(format!(
                "Failed to read skills ontology {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json_str(&content).map_err(|e| match e {
            MatcherError::Configuration(msg) => {
                MatcherError::Configuration(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let categories: BTreeMap<String, Vec<String>> = serde_json::from_str(json).map_err(|e| {
            MatcherError::Configuration(format!(
                "Skills ontology must be an object of category -> [terms]: {}",
                e
            ))
        })?;
        Self::from_categories(categories)
    }

    pub fn from_categories(categories: BTreeMap<String, Vec<String>>) -> Result<Self> {
        for (category, terms) in &categories {
            if let Some(position) = terms.iter().position(|t| t.trim().is_empty()) {
                return Err(MatcherError::Configuration(format!(
                    "Skills ontology category '{}' has a blank term at index {}",
                    category, position
                )));
            }
        }
        Ok(Self { categories })
    }

    /// Sorted, deduplicated union of every category's terms
    pub fn vocabulary(&self) -> Vec<String> {
        self.categories
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
