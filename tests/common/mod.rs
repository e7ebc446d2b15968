use resume_matcher::error::Result;
use resume_matcher::processing::embeddings::SentenceEncoder;

const DIMENSIONS: usize = 64;

/// Deterministic bag-of-words encoder so tests never download a model
pub struct HashingEncoder;

impl SentenceEncoder for HashingEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(sentences.iter().map(|s| embed(s)).collect())
    }

    fn model_name(&self) -> &str {
        "hashing-test-encoder"
    }
}

fn embed(sentence: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; DIMENSIONS];
    for word in sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in word.to_lowercase().bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        vector[(hash % DIMENSIONS as u64) as usize] += 1.0;
    }
    vector
}
