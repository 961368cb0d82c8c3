use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::embedding::{Embedder, EmbeddingError, EmbeddingVector};

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w+#.]+").unwrap());

/// Deterministic offline oracle: signed feature hashing of lowercase word tokens.
///
/// - no model download, no network
/// - blake3 keeps bucket assignment stable across platforms and Rust versions
/// - captures lexical overlap only; not a semantic model
///
/// Changing the token rule or hash layout changes every vector: bump `MODEL_NAME`.
pub struct HashingEmbedder {
    dimension: usize,
}

const MODEL_NAME: &str = "feature-hashing-v1";

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn embed_sync(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0f32; self.dimension];

        let lower = text.to_lowercase();
        for token in WORD.find_iter(&lower) {
            let token = token.as_str().trim_matches('.');
            if token.is_empty() {
                continue;
            }
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();
            let bucket = u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]);
            let idx = (bucket % self.dimension as u64) as usize;
            // Sign bit from an independent byte so collisions tend to cancel.
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        // L2 normalize
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        EmbeddingVector::new(vector)
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        Ok(self.embed_sync(text))
    }
}
