use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// OpenAI-compatible embeddings server.
    Http,
    /// Offline feature hashing.
    Hashing,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding_backend: EmbeddingBackend,
    pub embedding_api_base: Option<String>,
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub embedding_timeout: Duration,
    pub match_scan_limit: usize,
    pub match_top_n: usize,
    pub skill_vocabulary_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let embedding_backend = match get("EMBEDDING_BACKEND").as_deref() {
            None | Some("hashing") => EmbeddingBackend::Hashing,
            Some("http") => EmbeddingBackend::Http,
            Some(other) => bail!("EMBEDDING_BACKEND must be 'http' or 'hashing', got '{other}'"),
        };

        let embedding_api_base = get("EMBEDDING_API_BASE");
        if embedding_backend == EmbeddingBackend::Http && embedding_api_base.is_none() {
            bail!("Required environment variable 'EMBEDDING_API_BASE' is not set");
        }

        let embedding_dimensions = positive(get("EMBEDDING_DIMENSIONS"), 384, "EMBEDDING_DIMENSIONS")?;
        let match_scan_limit = positive(get("MATCH_SCAN_LIMIT"), 50, "MATCH_SCAN_LIMIT")?;
        let match_top_n = positive(get("MATCH_TOP_N"), 10, "MATCH_TOP_N")?;

        Ok(Config {
            embedding_backend,
            embedding_api_base,
            embedding_api_key: get("EMBEDDING_API_KEY"),
            embedding_model: get("EMBEDDING_MODEL")
                .unwrap_or_else(|| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
            embedding_dimensions,
            embedding_timeout: Duration::from_secs(
                parse_or(get("EMBEDDING_TIMEOUT_SECS"), 30)
                    .context("EMBEDDING_TIMEOUT_SECS must be a number of seconds")?,
            ),
            match_scan_limit,
            match_top_n,
            skill_vocabulary_path: get("SKILL_VOCABULARY_PATH").map(PathBuf::from),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => Ok(v.trim().parse::<T>()?),
        None => Ok(default),
    }
}

fn positive(value: Option<String>, default: usize, name: &str) -> Result<usize> {
    let parsed: usize =
        parse_or(value, default).with_context(|| format!("{name} must be a positive integer"))?;
    if parsed == 0 {
        bail!("{name} must be a positive integer");
    }
    Ok(parsed)
}
