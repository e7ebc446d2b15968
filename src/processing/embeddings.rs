//! Sentence embeddings and top-k semantic similarity using Model2Vec

use crate::error::{MatcherError, Result};
use log::{debug, info, warn};
use model2vec_rs::model::StaticModel;
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::time::Instant;

/// Anything that turns sentences into fixed-length vectors.
///
/// Implementations must be usable from several scoring calls at once.
pub trait SentenceEncoder: Send + Sync {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>>;

    fn model_name(&self) -> &str;
}

/// A loaded Model2Vec static embedding model
pub struct EmbeddingEngine {
    model: StaticModel,
    model_name: String,
}

impl EmbeddingEngine {
    /// Load from a local model folder or a Hugging Face repo id
    pub fn load(repo_or_path: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model: {}", repo_or_path);

        let model = StaticModel::from_pretrained(repo_or_path, None, None, None)
            .map_err(|e| MatcherError::ModelLoading(format!("Failed to load {}: {:#}", repo_or_path, e)))?;

        info!("Model loaded in {:.2?}", start_time.elapsed());
        Ok(Self {
            model,
            model_name: repo_or_path.to_string(),
        })
    }
}

impl SentenceEncoder for EmbeddingEngine {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(sentences))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Loaded on first use and kept for the life of the process
static SHARED_ENGINE: OnceCell<EmbeddingEngine> = OnceCell::new();

/// Encoder backed by the process-wide model.
///
/// The model loads on the first `encode`, not on construction, so scoring
/// inputs that never reach the embedding step never pay for it. Only the first
/// successfully loaded model is kept; later requests for a different model
/// reuse it.
#[derive(Debug, Clone)]
pub struct SharedEncoder {
    model_name: String,
}

impl SharedEncoder {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }

    fn engine(&self) -> Result<&'static EmbeddingEngine> {
        let engine = SHARED_ENGINE.get_or_try_init(|| EmbeddingEngine::load(&self.model_name))?;
        if engine.model_name != self.model_name {
            warn!(
                "Embedding model '{}' requested but '{}' is already loaded for this process",
                self.model_name, engine.model_name
            );
        }
        Ok(engine)
    }
}

impl SentenceEncoder for SharedEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        self.engine()?.encode(sentences)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine similarity of two vectors; 0.0 when either has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(MatcherError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Top-k semantic similarity between resume and JD sentences, in [0, 1].
///
/// Every resume sentence is credited with its `k = min(top_k, jd sentences)`
/// best cosine matches among the JD sentences; those values are averaged over
/// all resume sentences and mapped from [-1, 1] onto [0, 1]. Returns 0.0 without
/// touching the encoder when either side has no sentences.
pub fn embedding_similarity(
    encoder: &dyn SentenceEncoder,
    resume_chunks: &[String],
    jd_chunks: &[String],
    top_k: usize,
) -> Result<f64> {
    if resume_chunks.is_empty() || jd_chunks.is_empty() {
        return Ok(0.0);
    }

    let resume_embeddings = encode_checked(encoder, resume_chunks)?;
    let jd_embeddings = encode_checked(encoder, jd_chunks)?;

    let k = top_k.max(1).min(jd_embeddings.len());
    let mut total = 0.0f64;

    for resume_vec in &resume_embeddings {
        let mut row = jd_embeddings
            .iter()
            .map(|jd_vec| cosine_similarity(resume_vec, jd_vec))
            .collect::<Result<Vec<f32>>>()?;
        row.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        total += row.iter().take(k).map(|&s| f64::from(s)).sum::<f64>();
    }

    let mean = total / (resume_embeddings.len() * k) as f64;
    let score = ((mean + 1.0) / 2.0).clamp(0.0, 1.0);
    debug!(
        "Embedding similarity: {}x{} sentences, k={}, mean cosine {:.4}",
        resume_embeddings.len(),
        jd_embeddings.len(),
        k,
        mean
    );

    Ok(score)
}

fn encode_checked(encoder: &dyn SentenceEncoder, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
    let embeddings = encoder.encode(sentences)?;
    if embeddings.len() != sentences.len() {
        return Err(MatcherError::Embedding(format!(
            "{} returned {} embeddings for {} sentences",
            encoder.model_name(),
            embeddings.len(),
            sentences.len()
        )));
    }
    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Maps each sentence to a fixed vector by its first word
    struct TableEncoder {
        calls: AtomicUsize,
    }

    impl TableEncoder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SentenceEncoder for TableEncoder {
        fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(sentences
                .iter()
                .map(|s| match s.split_whitespace().next() {
                    Some("east") => vec![1.0, 0.0],
                    Some("north") => vec![0.0, 1.0],
                    Some("west") => vec![-1.0, 0.0],
                    _ => vec![0.0, 0.0],
                })
                .collect())
        }

        fn model_name(&self) -> &str {
            "table"
        }
    }

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
        assert!(cosine_similarity(&[1.0], &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_empty_side_skips_encoder() {
        let encoder = TableEncoder::new();
        let score = embedding_similarity(&encoder, &[], &sentences(&["east"]), 3).unwrap();
        assert_eq!(score, 0.0);
        let score = embedding_similarity(&encoder, &sentences(&["east"]), &[], 3).unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(encoder.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[test]
    fn test_identical_sentences_score_one() {
        let encoder = TableEncoder::new();
        let score = embedding_similarity(&encoder, &sentences(&["east a"]), &sentences(&["east b"]), 3).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_sentences_score_zero() {
        let encoder = TableEncoder::new();
        let score = embedding_similarity(&encoder, &sentences(&["east"]), &sentences(&["west"]), 3).unwrap();
        assert!(score.abs() < 1e-9);
    }

    #[test]
    fn test_top_k_averages_best_matches() {
        let encoder = TableEncoder::new();
        let resume = sentences(&["east"]);
        let jd = sentences(&["east", "north", "west"]);

        // top-1: cos 1 -> 1.0
        let top1 = embedding_similarity(&encoder, &resume, &jd, 1).unwrap();
        assert!((top1 - 1.0).abs() < 1e-9);

        // top-2: mean(1, 0) = 0.5 -> 0.75
        let top2 = embedding_similarity(&encoder, &resume, &jd, 2).unwrap();
        assert!((top2 - 0.75).abs() < 1e-9);

        // k is capped by JD sentence count: mean(1, 0, -1) = 0 -> 0.5
        let top5 = embedding_similarity(&encoder, &resume, &jd, 5).unwrap();
        assert!((top5 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_encoder_output_is_error() {
        struct Broken;
        impl SentenceEncoder for Broken {
            fn encode(&self, _sentences: &[String]) -> Result<Vec<Vec<f32>>> {
                Ok(vec![])
            }
            fn model_name(&self) -> &str {
                "broken"
            }
        }

        let result = embedding_similarity(&Broken, &sentences(&["a"]), &sentences(&["b"]), 3);
        assert!(matches!(result, Err(MatcherError::Embedding(_))));
    }
}
