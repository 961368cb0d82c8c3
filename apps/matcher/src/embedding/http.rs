//! HTTP embedding client for an OpenAI-compatible `/v1/embeddings` endpoint
//! (text-embeddings-inference, vLLM, a sentence-transformers server, ...).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::embedding::{Embedder, EmbeddingError, EmbeddingVector};

const EMBEDDINGS_PATH: &str = "/v1/embeddings";
const MAX_RETRIES: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

/// Embedding oracle backed by a remote model server.
/// Build once per process and share behind an `Arc`.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    dimension: usize,
    backoff_base: Duration,
}

impl HttpEmbedder {
    pub fn new(
        api_base: &str,
        api_key: Option<String>,
        model: String,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}{}", api_base.trim_end_matches('/'), EMBEDDINGS_PATH),
            api_key,
            model,
            dimension,
            backoff_base: BACKOFF_BASE,
        })
    }

    #[cfg(test)]
    fn with_backoff(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Retries on 429 and 5xx with exponential backoff (1s, 2s).
    async fn request(&self, text: &str) -> Result<Value, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, message);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(EmbeddingError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        if text.trim().is_empty() {
            return Ok(EmbeddingVector::zeros(self.dimension));
        }

        let json = self.request(text).await?;
        let values = parse_first_embedding(&json)?;

        if values.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: values.len(),
            });
        }

        debug!(model = %self.model, chars = text.len(), "embedding computed");
        Ok(EmbeddingVector::new(values))
    }
}

/// Pulls the embedding with the lowest `index` out of an OpenAI-style response.
fn parse_first_embedding(json: &Value) -> Result<Vec<f32>, EmbeddingError> {
    let data = json
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::MalformedResponse("missing data array".to_string()))?;

    let item = data
        .iter()
        .enumerate()
        .min_by_key(|(fallback, item)| {
            item.get("index")
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(*fallback)
        })
        .map(|(_, item)| item)
        .ok_or_else(|| EmbeddingError::MalformedResponse("empty data array".to_string()))?;

    let embedding = item
        .get("embedding")
        .and_then(|v| v.as_array())
        .ok_or_else(|| EmbeddingError::MalformedResponse("item missing embedding array".to_string()))?;

    embedding
        .iter()
        .map(|value| {
            value.as_f64().map(|n| n as f32).ok_or_else(|| {
                EmbeddingError::MalformedResponse("embedding value must be numeric".to_string())
            })
        })
        .collect()
}
