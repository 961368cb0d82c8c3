//! Single-signal scorers kept alongside the composite score for comparison.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::normalize::normalize;
use crate::extraction::skills::{extract_skills, SkillVocabulary};

/// Skill score when the job names no recognizable skills.
pub const NO_JD_SKILLS_DEFAULT: f64 = 70.0;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// English stop words removed before TF-IDF weighting (the classic 318-word list).
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
    "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

static STOP_WORD_SET: Lazy<BTreeSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Skill-overlap ratio only: `|resume ∩ jd| / |jd| * 100`, or
/// [`NO_JD_SKILLS_DEFAULT`] when the job names no vocabulary skill.
pub fn baseline_fit_score(resume_text: &str, jd_text: &str, vocabulary: &SkillVocabulary) -> f64 {
    let resume_skills = extract_skills(&normalize(resume_text), vocabulary);
    let jd_skills = extract_skills(&normalize(jd_text), vocabulary);
    skill_overlap_score(&resume_skills, &jd_skills)
}

pub(crate) fn skill_overlap_score(resume: &BTreeSet<String>, jd: &BTreeSet<String>) -> f64 {
    if jd.is_empty() {
        return NO_JD_SKILLS_DEFAULT;
    }
    let overlap = resume.intersection(jd).count();
    (overlap as f64 / jd.len() as f64 * 100.0).min(100.0)
}

/// TF-IDF cosine similarity between the two raw texts, scaled to [0, 100].
///
/// The corpus is just `{resume_text, jd_text}`: vocabulary and IDF weights are
/// local to the pair, so scores are not comparable across different pairs.
/// Returns 0.0 when either side is empty.
pub fn tfidf_fit_score(resume_text: &str, jd_text: &str) -> f64 {
    if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
        return 0.0;
    }

    let resume_tf = term_counts(resume_text);
    let jd_tf = term_counts(jd_text);

    // Smoothed IDF over a two-document corpus: ln((1 + n) / (1 + df)) + 1.
    let n = 2.0_f64;
    let idf = |term: &str| {
        let df = [&resume_tf, &jd_tf]
            .iter()
            .filter(|tf| tf.contains_key(term))
            .count() as f64;
        ((1.0 + n) / (1.0 + df)).ln() + 1.0
    };

    let weigh = |tf: &BTreeMap<String, f64>| -> BTreeMap<String, f64> {
        let weighted: BTreeMap<String, f64> = tf
            .iter()
            .map(|(term, count)| (term.clone(), count * idf(term)))
            .collect();
        let norm = weighted.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return weighted;
        }
        weighted.into_iter().map(|(t, w)| (t, w / norm)).collect()
    };

    let resume_vec = weigh(&resume_tf);
    let jd_vec = weigh(&jd_tf);

    let cosine: f64 = resume_vec
        .iter()
        .filter_map(|(term, w)| jd_vec.get(term).map(|v| w * v))
        .sum();

    (cosine * 100.0).clamp(0.0, 100.0)
}

fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let lower = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for token in TOKEN.find_iter(&lower) {
        let token = token.as_str();
        if STOP_WORD_SET.contains(token) {
            continue;
        }
        *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}
