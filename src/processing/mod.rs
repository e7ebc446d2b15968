//! Scoring engine: normalization, term extraction and the four scorers

pub mod analyzer;
pub mod embeddings;
pub mod evidence;
pub mod keywords;
pub mod ontology;
pub mod skills;
pub mod term_extractor;
pub mod text_processor;
