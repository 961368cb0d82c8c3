//! Embedding oracle: the only external capability the scoring engine depends on.
//!
//! The engine holds an `Arc<dyn Embedder>`, chosen once at startup:
//! `HttpEmbedder` talks to a sentence-embedding server, `HashingEmbedder`
//! is a deterministic offline stand-in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod hashing;
pub mod http;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed embedding response: {0}")]
    MalformedResponse(String),

    #[error("Expected a {expected}-dimension embedding, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding request failed after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// Dense vector for one document. Only comparable with vectors from the same oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Cosine similarity in [-1, 1]. Zero-norm vectors and dimension mismatches yield 0.0.
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        if self.dimension() != other.dimension() {
            warn!(
                a_len = self.dimension(),
                b_len = other.dimension(),
                "embedding dimension mismatch; returning zero similarity"
            );
            return 0.0;
        }

        let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            let (a, b) = (f64::from(*a), f64::from(*b));
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
    }
}

/// Maps text to a fixed-dimension vector.
///
/// Implementations must be deterministic for identical input and must return
/// `EmbeddingVector::zeros(self.dimension())` for empty input instead of failing.
/// Shared across concurrent scoring requests, hence `Send + Sync`.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn model_name(&self) -> &str;

    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError>;
}
