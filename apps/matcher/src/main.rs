mod cli;
mod commands;
mod config;
mod documents;
mod embedding;
mod errors;
mod extraction;
mod matching;
mod scoring;
mod state;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match Config::from_env() {
        Ok(config) => {
            init_tracing(&config);
            info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));
            execute(config, cli.command).await
        }
        Err(e) => Err(AppError::from(e)),
    };

    // stdout carries the JSON result only; failures go to stderr in the same shape.
    match result {
        Ok(output) => {
            println!("{output:#}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e.to_json());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(config: &Config) {
    // Logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn execute(config: Config, command: Command) -> Result<Value, AppError> {
    let state = AppState::from_config(config)?;
    commands::run(&state, command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::cli::ScoreMode;
    use crate::config::EmbeddingBackend;

    fn config() -> Config {
        Config {
            embedding_backend: EmbeddingBackend::Hashing,
            embedding_api_base: None,
            embedding_api_key: None,
            embedding_model: "unused".to_string(),
            embedding_dimensions: 64,
            embedding_timeout: Duration::from_secs(5),
            match_scan_limit: 50,
            match_top_n: 10,
            skill_vocabulary_path: None,
            rust_log: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_startup_failure_renders_error_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.skill_vocabulary_path = Some(dir.path().join("missing-skills.txt"));

        let command = Command::Score {
            resume: dir.path().join("r.txt"),
            job: dir.path().join("j.txt"),
            mode: ScoreMode::Composite,
        };
        let err = execute(config, command).await.unwrap_err();

        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.exit_code(), 1);
        let body = err.to_json();
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing-skills.txt"));
    }

    #[tokio::test]
    async fn test_execute_runs_command() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("r.txt");
        std::fs::write(&doc, "Rust and Docker, 4 years").unwrap();

        let out = execute(config(), Command::Profile { document: doc }).await.unwrap();
        assert_eq!(out["experience_years"], 4);
    }
}
