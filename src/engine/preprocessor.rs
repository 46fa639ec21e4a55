//! Skill normalization and composite profile text construction

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// Normalize a raw comma-separated skill string into canonical tokens.
///
/// Each entry is trimmed, lowercased, and internal whitespace runs are
/// collapsed into a single underscore, so "Machine  Learning" becomes
/// `machine_learning`. Blank entries are dropped. The function is
/// idempotent: normalizing already-normalized tokens is a no-op.
pub fn normalize_skills(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| whitespace_regex().replace_all(entry, "_").into_owned())
        .collect()
}

/// Build the composite profile text for one entity.
///
/// Categorical fields are lowercased and concatenated in the caller's
/// declared order, followed by the normalized skill tokens. Both entity
/// kinds go through this same function, which keeps their texts comparable
/// in a jointly-fit vector space.
pub fn build_profile_text(categoricals: &[&str], skill_tokens: &[String]) -> String {
    let mut parts: Vec<String> = categoricals
        .iter()
        .map(|field| field.trim().to_lowercase())
        .filter(|field| !field.is_empty())
        .collect();
    parts.extend(skill_tokens.iter().cloned());
    parts.join(" ")
}

/// Common English stop words, excluded from vector-space vocabularies so
/// generic terms do not dominate the weighting.
pub fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| {
        [
            "a", "about", "above", "after", "again", "against", "all", "am",
            "an", "and", "any", "are", "as", "at", "be", "because", "been",
            "before", "being", "below", "between", "both", "but", "by", "can",
            "did", "do", "does", "doing", "down", "during", "each", "few",
            "for", "from", "further", "had", "has", "have", "having", "he",
            "her", "here", "hers", "herself", "him", "himself", "his", "how",
            "i", "if", "in", "into", "is", "it", "its", "itself", "just",
            "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
            "of", "off", "on", "once", "only", "or", "other", "our", "ours",
            "ourselves", "out", "over", "own", "same", "she", "should", "so",
            "some", "such", "than", "that", "the", "their", "theirs", "them",
            "themselves", "then", "there", "these", "they", "this", "those",
            "through", "to", "too", "under", "until", "up", "very", "was",
            "we", "were", "what", "when", "where", "which", "while", "who",
            "whom", "why", "will", "with", "you", "your", "yours", "yourself",
            "yourselves",
        ]
        .into_iter()
        .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let tokens = normalize_skills("Python, Machine Learning, SQL");
        assert_eq!(tokens, vec!["python", "machine_learning", "sql"]);
    }

    #[test]
    fn test_normalize_collapses_internal_whitespace() {
        let tokens = normalize_skills("Machine   Learning,  Cloud\tComputing ");
        assert_eq!(tokens, vec!["machine_learning", "cloud_computing"]);
    }

    #[test]
    fn test_normalize_drops_blank_entries() {
        let tokens = normalize_skills("Python,, ,SQL,");
        assert_eq!(tokens, vec!["python", "sql"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize_skills("").is_empty());
        assert!(normalize_skills("  ,  , ").is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_skills("Python, Machine Learning, Node.js");
        let again = normalize_skills(&once.join(", "));
        assert_eq!(once, again);
    }

    #[test]
    fn test_profile_text_field_order() {
        let tokens = vec!["python".to_string(), "sql".to_string()];
        let text = build_profile_text(&["Computer Science", "Bangalore"], &tokens);
        assert_eq!(text, "computer science bangalore python sql");
    }

    #[test]
    fn test_profile_text_skips_empty_fields() {
        let tokens = vec!["python".to_string()];
        let text = build_profile_text(&["", "Remote"], &tokens);
        assert_eq!(text, "remote python");
    }

    #[test]
    fn test_stop_words_cover_common_terms() {
        let words = stop_words();
        assert!(words.contains("and"));
        assert!(words.contains("the"));
        assert!(!words.contains("python"));
    }
}
