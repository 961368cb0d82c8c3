use std::collections::BTreeSet;

const MAX_SKILLS_SUGGESTED: usize = 3;

/// Builds improvement suggestions. Each rule adds at most one line:
/// 1. up to three missing skills (lexical order, so output is reproducible)
/// 2. the exact experience gap, when the resume falls short
/// 3. a generic positive note, only if neither rule fired
pub fn generate_suggestions(
    missing_skills: &BTreeSet<String>,
    resume_years: u32,
    jd_years: u32,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !missing_skills.is_empty() {
        let top_missing: Vec<&str> = missing_skills
            .iter()
            .take(MAX_SKILLS_SUGGESTED)
            .map(String::as_str)
            .collect();
        suggestions.push(format!(
            "Consider learning or highlighting these skills: {}.",
            top_missing.join(", ")
        ));
    }

    if resume_years < jd_years {
        suggestions.push(format!(
            "Highlight specific projects to compensate for the {} year(s) experience gap.",
            jd_years - resume_years
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(
            "Your profile is a strong match. Ensure your bullet points are outcome-oriented!"
                .to_string(),
        );
    }

    suggestions
}
