//! Text normalizer: collapses whitespace and strips noise from extracted document text.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Keeps word characters, whitespace, and the punctuation that carries meaning in
// skills and contact details: `@` (emails), `.` (node.js, 2.5), `+` (c++), `#` (c#).
static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s@.+#]").unwrap());

/// Normalizes raw extracted text into a single trimmed line.
///
/// Never fails: empty input, or input that is nothing but noise, yields `""`.
/// Must run before skill and experience extraction so that whole-word matching
/// sees the same token boundaries on both the resume and the job side.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let cleaned = NOISE.replace_all(&collapsed, "");
    // Stripping can leave a double space behind ("a - b" -> "a  b").
    WHITESPACE_RUN.replace_all(cleaned.trim(), " ").into_owned()
}
