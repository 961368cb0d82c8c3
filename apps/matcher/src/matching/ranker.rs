//! Match Ranker: scores a resume against catalog postings and keeps the best.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::embedding::EmbeddingError;
use crate::matching::jobs::JobPosting;
use crate::scoring::engine::{ScoreBreakdown, ScoringEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub match_score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    pub jobs_considered: usize,
    pub matches: Vec<JobMatch>,
}

pub struct MatchRanker {
    engine: Arc<ScoringEngine>,
    scan_limit: usize,
    top_n: usize,
}

impl MatchRanker {
    pub fn new(engine: Arc<ScoringEngine>, scan_limit: usize, top_n: usize) -> Self {
        Self {
            engine,
            scan_limit,
            top_n,
        }
    }

    /// Scores the first `scan_limit` jobs and returns the `top_n` best,
    /// highest `final_score` first. Ties keep catalog order.
    ///
    /// The resume is prepared (and embedded) once for the whole scan.
    pub async fn rank(
        &self,
        resume_text: &str,
        jobs: &[JobPosting],
    ) -> Result<MatchReport, EmbeddingError> {
        let resume = self.engine.prepare(resume_text).await?;
        let considered = &jobs[..jobs.len().min(self.scan_limit)];

        let mut matches = Vec::with_capacity(considered.len());
        for job in considered {
            let prepared = self.engine.prepare(&job.scoring_text()).await?;
            let breakdown = self.engine.score_prepared(&resume, &prepared);
            matches.push(JobMatch {
                job_id: job.id.clone(),
                job_title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                match_score: breakdown.final_score,
                breakdown,
            });
        }

        // sort_by is stable
        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.truncate(self.top_n);

        info!(
            "Ranked {} of {} jobs, returning top {}",
            considered.len(),
            jobs.len(),
            matches.len()
        );

        Ok(MatchReport {
            generated_at: Utc::now(),
            jobs_considered: considered.len(),
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::hashing::HashingEmbedder;
    use crate::extraction::education::EducationKeywords;
    use crate::extraction::skills::SkillVocabulary;

    fn posting(id: &str, title: &str, skills: &[&str]) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: String::new(),
            skills_required: skills.iter().map(|s| s.to_string()).collect(),
            experience_level: None,
            url: None,
        }
    }

    fn ranker(scan_limit: usize, top_n: usize) -> MatchRanker {
        let engine = ScoringEngine::new(
            Arc::new(HashingEmbedder::new(384)),
            SkillVocabulary::default(),
            EducationKeywords::default(),
        );
        MatchRanker::new(Arc::new(engine), scan_limit, top_n)
    }

    fn jobs() -> Vec<JobPosting> {
        vec![
            posting("nurse", "Nurse", &[]),
            posting("data", "Data Engineer", &["python", "sql", "aws"]),
            posting("web", "Web Developer", &["react", "css", "html"]),
            posting("py", "Python Developer", &["python", "sql"]),
        ]
    }

    #[tokio::test]
    async fn test_ranks_best_match_first() {
        let report = ranker(50, 10)
            .rank("Python and SQL engineer", &jobs())
            .await
            .unwrap();

        assert_eq!(report.jobs_considered, 4);
        assert_eq!(report.matches.len(), 4);
        assert_eq!(report.matches[0].job_id, "py");
        assert!(report
            .matches
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[tokio::test]
    async fn test_truncates_to_top_n() {
        let report = ranker(50, 2)
            .rank("Python and SQL engineer", &jobs())
            .await
            .unwrap();
        assert_eq!(report.matches.len(), 2);
    }

    #[tokio::test]
    async fn test_scan_limit_bounds_considered_jobs() {
        let report = ranker(2, 10)
            .rank("Python and SQL engineer", &jobs())
            .await
            .unwrap();
        assert_eq!(report.jobs_considered, 2);
        assert!(report.matches.iter().all(|m| m.job_id == "nurse" || m.job_id == "data"));
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_no_matches() {
        let report = ranker(50, 10).rank("anything", &[]).await.unwrap();
        assert!(report.matches.is_empty());
        assert_eq!(report.jobs_considered, 0);
    }

    #[tokio::test]
    async fn test_match_score_mirrors_breakdown() {
        let report = ranker(50, 10).rank("React, CSS", &jobs()).await.unwrap();
        for m in &report.matches {
            assert_eq!(m.match_score, m.breakdown.final_score);
        }
    }

    #[tokio::test]
    async fn test_ties_keep_catalog_order() {
        let catalog = vec![
            posting("first", "Web Developer", &["react", "css", "html"]),
            posting("best", "Python Developer", &["python", "sql"]),
            posting("second", "Web Developer", &["react", "css", "html"]),
            posting("third", "Web Developer", &["react", "css", "html"]),
        ];

        let report = ranker(50, 10)
            .rank("Python and SQL engineer", &catalog)
            .await
            .unwrap();

        let ids: Vec<&str> = report.matches.iter().map(|m| m.job_id.as_str()).collect();
        assert_eq!(ids, vec!["best", "first", "second", "third"]);
        assert_eq!(report.matches[1].match_score, report.matches[3].match_score);
    }
}
