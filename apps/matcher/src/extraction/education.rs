use std::collections::BTreeSet;

const DEFAULT_DEGREE_KEYWORDS: &[&str] = &["phd", "master", "bachelor", "degree", "mba", "bsc", "msc"];

/// Degree-related keywords scanned for by the education component.
///
/// Matching is case-insensitive *substring* matching, not whole-word: "masters"
/// and "bachelor's" both count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationKeywords {
    keywords: BTreeSet<String>,
}

impl Default for EducationKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_DEGREE_KEYWORDS.iter().copied())
    }
}

impl EducationKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Keywords that occur anywhere in `text`.
    pub fn detect(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .cloned()
            .collect()
    }
}
