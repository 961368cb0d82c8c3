//! Skill extraction: boundary-aware whole-word/phrase matching against a fixed vocabulary.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::extraction::normalize::normalize;

/// Built-in vocabulary. Multi-word phrases are atomic entries, distinct from
/// their constituent words.
const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "c++", "c#", "javascript", "typescript", "react", "next.js",
    "angular", "vue", "node.js", "express", "go", "ruby", "sql", "nosql", "mongodb",
    "postgresql", "mysql", "aws", "azure", "gcp", "docker", "kubernetes", "tensorflow",
    "pytorch", "scikit-learn", "pandas", "numpy", "html", "css", "git", "linux",
    "agile", "scrum", "machine learning", "deep learning", "nlp", "fastapi", "flask",
    "django", "rest api", "graphql", "devops", "cicd", "microservices", "rust", "swift",
];

/// A compiled vocabulary term.
#[derive(Debug, Clone)]
struct SkillTerm {
    canonical: String,
    pattern: Regex,
}

/// Immutable, case-insensitive set of canonical skill strings.
///
/// The same vocabulary must be used on the resume and the job side so that
/// the resulting skill sets are comparable.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<SkillTerm>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary terms. Terms are lowercased, trimmed,
    /// and deduplicated; blank terms are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical: BTreeSet<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let terms = canonical
            .into_iter()
            .filter_map(|canonical| {
                let matchable = normalize(&canonical);
                if matchable.is_empty() {
                    warn!("Skipping skill term '{canonical}': nothing left after normalization");
                    return None;
                }
                Some(SkillTerm {
                    pattern: boundary_pattern(&matchable),
                    canonical,
                })
            })
            .collect();

        Self { terms }
    }

    /// Loads a newline-delimited vocabulary file. Blank lines and lines starting
    /// with `#` are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary '{}'", path.display()))?;

        let vocabulary = Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );

        if vocabulary.is_empty() {
            anyhow::bail!("Skill vocabulary '{}' contains no terms", path.display());
        }

        debug!(
            "Loaded {} skill terms from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.terms.iter().any(|t| t.canonical == term)
    }

    /// Canonical terms in lexical order.
    #[cfg(test)]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.canonical.as_str())
    }
}

/// Terms are matched in their normalized form so that "scikit-learn" still hits
/// text that went through [`normalize`] and lost its hyphen.
///
/// Matches `term` only when neither neighbour is a word character, so "java"
/// never fires inside "javascript" and "c++" still matches at end of input.
fn boundary_pattern(term: &str) -> Regex {
    // An escaped literal between fixed classes always compiles.
    Regex::new(&format!(r"(?i)(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(term)))
        .expect("escaped skill term is a valid pattern")
}

/// Returns the vocabulary entries occurring in `text` as a whole word or phrase.
///
/// Expects normalized text. Returns an empty set for empty input; never fails.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }

    vocabulary
        .terms
        .iter()
        .filter(|term| term.pattern.is_match(text))
        .map(|term| term.canonical.clone())
        .collect()
}
