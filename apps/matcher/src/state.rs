use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::{Config, EmbeddingBackend};
use crate::embedding::hashing::HashingEmbedder;
use crate::embedding::http::HttpEmbedder;
use crate::embedding::Embedder;
use crate::extraction::education::EducationKeywords;
use crate::extraction::skills::SkillVocabulary;
use crate::matching::ranker::MatchRanker;
use crate::scoring::engine::ScoringEngine;

/// Process-wide state: the embedding oracle is loaded once and shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub engine: Arc<ScoringEngine>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let embedder = build_embedder(&config)?;
        info!(
            "Embedding oracle ready (model: {}, dimension: {})",
            embedder.model_name(),
            embedder.dimension()
        );

        let vocabulary = match &config.skill_vocabulary_path {
            Some(path) => SkillVocabulary::from_file(path)?,
            None => SkillVocabulary::default(),
        };
        info!("Skill vocabulary: {} terms", vocabulary.len());

        let engine = ScoringEngine::new(embedder, vocabulary, EducationKeywords::default());

        Ok(Self {
            config,
            engine: Arc::new(engine),
        })
    }

    pub fn ranker(&self, top_n: Option<usize>) -> MatchRanker {
        MatchRanker::new(
            self.engine.clone(),
            self.config.match_scan_limit,
            top_n.unwrap_or(self.config.match_top_n),
        )
    }
}

fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    Ok(match config.embedding_backend {
        EmbeddingBackend::Hashing => Arc::new(HashingEmbedder::new(config.embedding_dimensions)),
        EmbeddingBackend::Http => {
            let api_base = config
                .embedding_api_base
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("EMBEDDING_API_BASE is required for the http backend"))?;
            Arc::new(HttpEmbedder::new(
                api_base,
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_dimensions,
                config.embedding_timeout,
            )?)
        }
    })
}
