//! Scoring Engine: weighted composite of skill, experience, education and
//! semantic signals, with an explainable breakdown and suggestions.
//!
//! Components (default weights):
//! - Skill match (40%): share of the job's skills present in the resume
//! - Experience match (25%): linear shortfall penalty on stated years
//! - Education match (15%): coarse degree-keyword overlap
//! - Semantic similarity (20%): cosine of the two document embeddings

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingError, EmbeddingVector};
use crate::extraction::education::EducationKeywords;
use crate::extraction::normalize::normalize;
use crate::extraction::profile::{extract_profile, ExtractedProfile};
use crate::extraction::skills::SkillVocabulary;
use crate::scoring::lexical::skill_overlap_score;
use crate::scoring::suggestions::generate_suggestions;
use crate::scoring::weights::ScoreWeights;

/// Education score when the resume shares none of the job's degree keywords.
const EDUCATION_PARTIAL_CREDIT: f64 = 50.0;

/// Explainable result of one scoring request. Not persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub semantic_score: f64,
    /// Job skills the resume covers.
    pub strengths: Vec<String>,
    /// Job skills the resume lacks. Together with `strengths` this partitions the job's skills.
    pub missing_skills: Vec<String>,
    pub years_found: u32,
    pub years_required: u32,
    pub suggestions: Vec<String>,
}

/// One side of a comparison with every per-document signal computed once.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub normalized: String,
    pub profile: ExtractedProfile,
    pub embedding: EmbeddingVector,
}

/// Stateless apart from its read-only configuration; safe to share behind an
/// `Arc` across concurrent requests.
pub struct ScoringEngine {
    embedder: Arc<dyn Embedder>,
    vocabulary: SkillVocabulary,
    education: EducationKeywords,
    weights: ScoreWeights,
}

impl ScoringEngine {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vocabulary: SkillVocabulary,
        education: EducationKeywords,
    ) -> Self {
        let weights = ScoreWeights::default();
        debug_assert!((weights.total() - 1.0).abs() < 1e-9);
        Self {
            embedder,
            vocabulary,
            education,
            weights,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Extraction only, no embedding call.
    pub fn profile(&self, text: &str) -> ExtractedProfile {
        extract_profile(&normalize(text), &self.vocabulary, &self.education)
    }

    /// Normalizes, extracts and embeds one document.
    pub async fn prepare(&self, text: &str) -> Result<PreparedDocument, EmbeddingError> {
        let normalized = normalize(text);
        let profile = extract_profile(&normalized, &self.vocabulary, &self.education);
        let embedding = self.embedder.embed(&normalized).await?;
        Ok(PreparedDocument {
            normalized,
            profile,
            embedding,
        })
    }

    /// Scores a resume against a job description.
    ///
    /// Only the embedding oracle can fail; its error is propagated unchanged.
    pub async fn score(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<ScoreBreakdown, EmbeddingError> {
        let resume = self.prepare(resume_text).await?;
        let jd = self.prepare(jd_text).await?;
        Ok(self.score_prepared(&resume, &jd))
    }

    /// Pure scoring over prepared documents. Directional: swapping the
    /// arguments generally changes the result.
    pub fn score_prepared(&self, resume: &PreparedDocument, jd: &PreparedDocument) -> ScoreBreakdown {
        let resume_skills = &resume.profile.skills;
        let jd_skills = &jd.profile.skills;

        let skill_score = skill_overlap_score(resume_skills, jd_skills);
        let strengths: BTreeSet<String> = jd_skills.intersection(resume_skills).cloned().collect();
        let missing: BTreeSet<String> = jd_skills.difference(resume_skills).cloned().collect();

        let years_found = resume.profile.experience_years;
        let years_required = jd.profile.experience_years;
        let experience_score = experience_score(years_found, years_required);

        let education_score = education_score(&resume.profile.education, &jd.profile.education);

        let semantic_score =
            (resume.embedding.cosine_similarity(&jd.embedding) * 100.0).clamp(0.0, 100.0);

        let final_score = self.weights.combine(
            skill_score,
            experience_score,
            education_score,
            semantic_score,
        );

        debug!(
            skill = skill_score,
            experience = experience_score,
            education = education_score,
            semantic = semantic_score,
            final_score,
            "scored resume against job"
        );

        let suggestions = generate_suggestions(&missing, years_found, years_required);

        ScoreBreakdown {
            final_score: round1(final_score),
            skill_score: round1(skill_score),
            experience_score: round1(experience_score),
            education_score: round1(education_score),
            semantic_score: round1(semantic_score),
            strengths: strengths.into_iter().collect(),
            missing_skills: missing.into_iter().collect(),
            years_found,
            years_required,
            suggestions,
        }
    }
}

/// Full credit when the job states no requirement or the resume meets it,
/// otherwise `resume / jd * 100`.
fn experience_score(resume_years: u32, jd_years: u32) -> f64 {
    if jd_years == 0 || resume_years >= jd_years {
        100.0
    } else {
        f64::from(resume_years) / f64::from(jd_years) * 100.0
    }
}

/// Full credit when the job mentions no degree keyword or any keyword overlaps.
fn education_score(resume: &BTreeSet<String>, jd: &BTreeSet<String>) -> f64 {
    if jd.is_empty() || !resume.is_disjoint(jd) {
        100.0
    } else {
        EDUCATION_PARTIAL_CREDIT
    }
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::hashing::HashingEmbedder;
    use async_trait::async_trait;

    /// Always returns the same unit vector, so semantic score is 100 for any
    /// non-empty pair.
    struct ConstantEmbedder;

    #[async_trait]
    impl Embedder for ConstantEmbedder {
        fn model_name(&self) -> &str {
            "constant"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            if text.is_empty() {
                return Ok(EmbeddingVector::zeros(2));
            }
            Ok(EmbeddingVector::new(vec![1.0, 0.0]))
        }
    }

    /// Maps text to one of two opposite vectors, to exercise negative cosine.
    struct OpposingEmbedder;

    #[async_trait]
    impl Embedder for OpposingEmbedder {
        fn model_name(&self) -> &str {
            "opposing"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            let sign = if text.contains("resume") { 1.0 } else { -1.0 };
            Ok(EmbeddingVector::new(vec![sign, 0.0]))
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        fn model_name(&self) -> &str {
            "failing"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Err(EmbeddingError::Api {
                status: 503,
                message: "model unavailable".to_string(),
            })
        }
    }

    fn engine_with(embedder: Arc<dyn Embedder>) -> ScoringEngine {
        ScoringEngine::new(
            embedder,
            SkillVocabulary::default(),
            EducationKeywords::default(),
        )
    }

    fn engine() -> ScoringEngine {
        engine_with(Arc::new(ConstantEmbedder))
    }

    #[tokio::test]
    async fn test_missing_experience_scores_zero() {
        let b = engine()
            .score("Python developer", "5 years of experience required")
            .await
            .unwrap();
        assert_eq!(b.years_found, 0);
        assert_eq!(b.years_required, 5);
        assert_eq!(b.experience_score, 0.0);
    }

    #[tokio::test]
    async fn test_job_without_skills_scores_seventy() {
        let b = engine()
            .score("Python, SQL, AWS", "Friendly, motivated team player")
            .await
            .unwrap();
        assert_eq!(b.skill_score, 70.0);
        assert!(b.strengths.is_empty());
        assert!(b.missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_partial_skill_overlap() {
        let b = engine()
            .score("Python and SQL", "We use Python, AWS and SQL")
            .await
            .unwrap();
        assert_eq!(b.skill_score, 66.7);
        assert_eq!(b.missing_skills, vec!["aws"]);
        assert_eq!(b.strengths, vec!["python", "sql"]);
    }

    #[tokio::test]
    async fn test_strengths_and_missing_partition_job_skills() {
        let b = engine()
            .score(
                "Rust, Docker, Linux, Git",
                "Rust, Kubernetes, Docker, AWS, Go and Linux",
            )
            .await
            .unwrap();
        let strengths: BTreeSet<_> = b.strengths.iter().cloned().collect();
        let missing: BTreeSet<_> = b.missing_skills.iter().cloned().collect();
        assert!(strengths.is_disjoint(&missing));
        let union: BTreeSet<_> = strengths.union(&missing).cloned().collect();
        let expected: BTreeSet<String> = ["aws", "docker", "go", "kubernetes", "linux", "rust"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(union, expected);
    }

    #[tokio::test]
    async fn test_no_degree_keyword_in_job_gives_full_education() {
        let b = engine()
            .score("High school diploma", "Backend engineer, Python")
            .await
            .unwrap();
        assert_eq!(b.education_score, 100.0);
    }

    #[tokio::test]
    async fn test_education_overlap_and_partial_credit() {
        let e = engine();
        let hit = e.score("MSc Data Science", "MSc or PhD preferred").await.unwrap();
        assert_eq!(hit.education_score, 100.0);

        let miss = e.score("Bootcamp graduate", "Bachelor degree required").await.unwrap();
        assert_eq!(miss.education_score, 50.0);
    }

    #[tokio::test]
    async fn test_identical_texts_have_full_semantic_score() {
        let e = engine_with(Arc::new(HashingEmbedder::new(384)));
        let text = "Senior Python engineer with 6 years of Django and PostgreSQL";
        let b = e.score(text, text).await.unwrap();
        assert_eq!(b.semantic_score, 100.0);
        assert_eq!(b.final_score, 100.0);
    }

    #[tokio::test]
    async fn test_negative_cosine_is_clamped_to_zero() {
        let b = engine_with(Arc::new(OpposingEmbedder))
            .score("my resume", "the job")
            .await
            .unwrap();
        assert_eq!(b.semantic_score, 0.0);
    }

    #[tokio::test]
    async fn test_empty_inputs_stay_in_bounds() {
        let e = engine_with(Arc::new(HashingEmbedder::new(64)));
        for (r, j) in [("", ""), ("", "5 years python"), ("python 9 years", "")] {
            let b = e.score(r, j).await.unwrap();
            for v in [
                b.final_score,
                b.skill_score,
                b.experience_score,
                b.education_score,
                b.semantic_score,
            ] {
                assert!((0.0..=100.0).contains(&v), "{v} out of range for ({r:?}, {j:?})");
            }
        }
    }

    #[tokio::test]
    async fn test_final_score_weighting() {
        // skill 50, experience 100 (no requirement), education 100, semantic 100
        // => 0.4*50 + 0.25*100 + 0.15*100 + 0.2*100 = 80
        let b = engine().score("Python", "Python and AWS").await.unwrap();
        assert_eq!(b.skill_score, 50.0);
        assert_eq!(b.final_score, 80.0);
    }

    #[tokio::test]
    async fn test_scoring_is_deterministic() {
        let e = engine_with(Arc::new(HashingEmbedder::new(384)));
        let r = "Java developer, 3 years, Spring and SQL, bachelor degree";
        let j = "Looking for Java, Kubernetes, AWS; 5+ years; master preferred";
        assert_eq!(e.score(r, j).await.unwrap(), e.score(r, j).await.unwrap());
    }

    #[tokio::test]
    async fn test_scoring_is_directional() {
        let e = engine();
        let forward = e.score("Python, 2 years", "Python, AWS, 6 years").await.unwrap();
        let backward = e.score("Python, AWS, 6 years", "Python, 2 years").await.unwrap();
        assert_ne!(forward.final_score, backward.final_score);
    }

    #[tokio::test]
    async fn test_suggestions_reflect_gaps() {
        let b = engine()
            .score("Python, 2 years", "Python, AWS, Docker, 6 years")
            .await
            .unwrap();
        assert_eq!(
            b.suggestions,
            vec![
                "Consider learning or highlighting these skills: aws, docker.".to_string(),
                "Highlight specific projects to compensate for the 4 year(s) experience gap."
                    .to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let err = engine_with(Arc::new(FailingEmbedder))
            .score("resume", "job")
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Api { status: 503, .. }));
    }

    #[test]
    fn test_experience_score_branches() {
        assert_eq!(experience_score(0, 0), 100.0);
        assert_eq!(experience_score(7, 5), 100.0);
        assert_eq!(experience_score(2, 8), 25.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(52.46), 52.5);
        assert_eq!(round1(0.04), 0.0);
    }
}
