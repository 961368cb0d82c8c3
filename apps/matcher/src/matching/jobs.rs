//! Job catalog. Postings imported from the resume/job CSV dataset or a JSON file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::normalize::normalize;
use crate::extraction::skills::{extract_skills, SkillVocabulary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl JobPosting {
    /// Job-side text handed to the scoring engine.
    pub fn scoring_text(&self) -> String {
        let mut parts = vec![self.title.clone(), self.description.clone()];
        if !self.skills_required.is_empty() {
            parts.push(format!("Skills: {}", self.skills_required.join(", ")));
        }
        if let Some(level) = &self.experience_level {
            parts.push(format!("Experience: {level}"));
        }
        parts.join(". ")
    }
}

/// One row of the dataset. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    career_objective: Option<String>,
    #[serde(default)]
    skills: Option<String>,
    #[serde(default)]
    experience: Option<String>,
}

/// Filters for [`JobCatalog::search`].
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// Case-insensitive substring over title, description and required skills.
    pub q: Option<String>,
    /// Case-insensitive substring over location.
    pub location: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    jobs: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }

    /// Loads `.csv` or `.json` by extension.
    pub fn load(path: &Path, import_limit: usize, vocabulary: &SkillVocabulary) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "Job catalog not found at {}",
                path.display()
            )));
        }

        let catalog = match extension(path).as_deref() {
            Some("csv") => Self::from_csv(path, import_limit, vocabulary)?,
            Some("json") => Self::from_json(path)?,
            _ => {
                return Err(AppError::Catalog(format!(
                    "Unsupported catalog format '{}': expected .csv or .json",
                    path.display()
                )))
            }
        };

        if catalog.is_empty() {
            warn!("Job catalog {} contains no postings", path.display());
        }
        Ok(catalog)
    }

    /// Imports up to `limit` postings from the dataset layout.
    ///
    /// Rows repeating an earlier (title, description) pair are skipped and do
    /// not count toward `limit`. Required skills come from the `skills` column.
    pub fn from_csv(path: &Path, limit: usize, vocabulary: &SkillVocabulary) -> Result<Self, AppError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut jobs = Vec::new();

        for (row_no, record) in reader.deserialize::<DatasetRow>().enumerate() {
            if jobs.len() >= limit {
                break;
            }

            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping malformed CSV row {}: {e}", row_no + 1);
                    continue;
                }
            };

            let title = non_empty(row.job_title).unwrap_or_else(|| "Unknown Position".to_string());
            let description = row.career_objective.unwrap_or_default();

            if !seen.insert((title.clone(), description.clone())) {
                continue;
            }

            let skills_required = extract_skills(&normalize(&row.skills.unwrap_or_default()), vocabulary)
                .into_iter()
                .collect();

            jobs.push(JobPosting {
                id: format!("job-{}", jobs.len() + 1),
                title,
                company: "Tech Corp".to_string(),
                location: non_empty(row.address).unwrap_or_else(|| "Remote".to_string()),
                description,
                skills_required,
                experience_level: Some(
                    non_empty(row.experience).unwrap_or_else(|| "Not specified".to_string()),
                ),
                url: None,
            });
        }

        info!("Imported {} jobs from {}", jobs.len(), path.display());
        Ok(Self::new(jobs))
    }

    pub fn from_json(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let jobs: Vec<JobPosting> = serde_json::from_str(&raw)?;
        info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(Self::new(jobs))
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn search(&self, query: &JobQuery) -> Vec<&JobPosting> {
        let q = query.q.as_deref().map(str::to_lowercase);
        let location = query.location.as_deref().map(str::to_lowercase);

        self.jobs
            .iter()
            .filter(|job| match &q {
                Some(q) => {
                    job.title.to_lowercase().contains(q)
                        || job.description.to_lowercase().contains(q)
                        || job.skills_required.iter().any(|s| s.to_lowercase().contains(q))
                }
                None => true,
            })
            .filter(|job| match &location {
                Some(loc) => job.location.to_lowercase().contains(loc),
                None => true,
            })
            .skip(query.skip)
            .take(query.limit)
            .collect()
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
