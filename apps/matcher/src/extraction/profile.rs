use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::extraction::education::EducationKeywords;
use crate::extraction::experience::extract_experience_years;
use crate::extraction::skills::{extract_skills, SkillVocabulary};

/// Facts derived from one document. Ephemeral: recomputed from raw text on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub skills: BTreeSet<String>,
    pub experience_years: u32,
    pub education: BTreeSet<String>,
}

/// Runs all extractors over already-normalized text.
pub fn extract_profile(
    normalized: &str,
    vocabulary: &SkillVocabulary,
    education: &EducationKeywords,
) -> ExtractedProfile {
    ExtractedProfile {
        skills: extract_skills(normalized, vocabulary),
        experience_years: extract_experience_years(normalized),
        education: education.detect(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize::normalize;

    #[test]
    fn test_extracts_all_signals() {
        let text = normalize("BSc Computer Science. 6+ years with Python, SQL and AWS.");
        let profile = extract_profile(
            &text,
            &SkillVocabulary::default(),
            &EducationKeywords::default(),
        );

        assert_eq!(profile.experience_years, 6);
        assert_eq!(
            profile.skills.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["aws", "python", "sql"]
        );
        assert!(profile.education.contains("bsc"));
    }

    #[test]
    fn test_empty_text_yields_default_profile() {
        let profile = extract_profile("", &SkillVocabulary::default(), &EducationKeywords::default());
        assert_eq!(profile, ExtractedProfile::default());
    }
}
