use once_cell::sync::Lazy;
use regex::Regex;

// "5 years", "10+ years", "3yrs", "7 year". The number must sit directly before
// the unit, with only an optional `+` and whitespace between them.
static YEARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\+?\s*(?:year|yr)").unwrap());

/// Best-guess total years of experience stated in `text`.
///
/// Collects every "<n> year(s)" / "<n> yr(s)" figure and returns the largest,
/// on the assumption that the biggest stated span is the total. Returns 0 when
/// nothing matches. Figures too large to be a plausible year count are ignored.
pub fn extract_experience_years(text: &str) -> u32 {
    YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}
