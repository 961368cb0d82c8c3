//! Command handlers. Each returns the JSON document printed on stdout.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::{Command, ScoreMode};
use crate::documents::load_document;
use crate::errors::AppError;
use crate::extraction::profile::ExtractedProfile;
use crate::matching::jobs::{JobCatalog, JobPosting, JobQuery};
use crate::scoring::engine::round1;
use crate::scoring::lexical::{baseline_fit_score, tfidf_fit_score};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ProfileResponse<'a> {
    document: &'a Path,
    #[serde(flatten)]
    profile: ExtractedProfile,
}

#[derive(Debug, Serialize)]
struct JobsResponse<'a> {
    total: usize,
    jobs: Vec<&'a JobPosting>,
}

pub async fn run(state: &AppState, command: Command) -> Result<Value, AppError> {
    match command {
        Command::Score { resume, job, mode } => {
            let resume_text = load_non_empty(&resume)?;
            let jd_text = load_non_empty(&job)?;
            handle_score(state, &resume_text, &jd_text, mode).await
        }
        Command::Profile { document } => {
            let text = load_document(&document)?;
            let profile = state.engine.profile(&text);
            Ok(serde_json::to_value(ProfileResponse {
                document: &document,
                profile,
            })?)
        }
        Command::Jobs {
            catalog,
            query,
            location,
            skip,
            limit,
            import_limit,
        } => {
            let catalog = JobCatalog::load(&catalog, import_limit, state.engine.vocabulary())?;
            let jobs = catalog.search(&JobQuery {
                q: query,
                location,
                skip,
                limit,
            });
            Ok(serde_json::to_value(JobsResponse {
                total: catalog.len(),
                jobs,
            })?)
        }
        Command::Rank {
            resume,
            catalog,
            top,
            import_limit,
        } => {
            if top == Some(0) {
                return Err(AppError::Validation("--top must be at least 1".to_string()));
            }
            let resume_text = load_non_empty(&resume)?;
            let catalog = JobCatalog::load(&catalog, import_limit, state.engine.vocabulary())?;
            // One call for the resume plus one per scanned posting.
            let calls = catalog.len().min(state.config.match_scan_limit) + 1;
            let report = with_timeout(
                state,
                calls,
                state.ranker(top).rank(&resume_text, catalog.jobs()),
            )
            .await?;
            Ok(serde_json::to_value(report)?)
        }
    }
}

async fn handle_score(
    state: &AppState,
    resume_text: &str,
    jd_text: &str,
    mode: ScoreMode,
) -> Result<Value, AppError> {
    match mode {
        ScoreMode::Composite => {
            let breakdown = with_timeout(state, 2, state.engine.score(resume_text, jd_text)).await?;
            Ok(serde_json::to_value(breakdown)?)
        }
        ScoreMode::Baseline => Ok(json!({
            "mode": "baseline",
            "score": round1(baseline_fit_score(resume_text, jd_text, state.engine.vocabulary())),
        })),
        ScoreMode::Lexical => Ok(json!({
            "mode": "lexical",
            "score": round1(tfidf_fit_score(resume_text, jd_text)),
        })),
    }
}

/// Attempts one embedding call may make, plus slack for the retry backoff.
const ATTEMPTS_PER_CALL: u32 = 4;

/// Time allowed for `calls` embedding requests at the configured per-request
/// timeout. Saturates instead of overflowing on very large settings.
fn call_budget(per_request: Duration, calls: usize) -> Duration {
    let factor = u32::try_from(calls)
        .unwrap_or(u32::MAX)
        .saturating_mul(ATTEMPTS_PER_CALL);
    per_request.checked_mul(factor).unwrap_or(Duration::MAX)
}

/// Bounds an embedding-backed operation that makes `calls` oracle requests.
async fn with_timeout<T>(
    state: &AppState,
    calls: usize,
    fut: impl std::future::Future<Output = Result<T, crate::embedding::EmbeddingError>>,
) -> Result<T, AppError> {
    let budget = call_budget(state.config.embedding_timeout, calls);
    match tokio::time::timeout(budget, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::Internal(anyhow::anyhow!(
            "Embedding oracle did not respond within {}s",
            budget.as_secs()
        ))),
    }
}

fn load_non_empty(path: &Path) -> Result<String, AppError> {
    let text = load_document(path)?;
    if text.is_empty() {
        return Err(AppError::Validation(format!(
            "No text could be extracted from {}",
            path.display()
        )));
    }
    Ok(text)
}
