//! Query handling: trimmed search queries and stopword-stripped keyword fallbacks.

use std::fmt;

const STOPWORDS: &[&str] = &[
    "what", "happens", "if", "i", "my", "the", "a", "an", "is", "are", "to", "do", "does",
];

/// A trimmed, non-empty query string. Identity key for the result cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Removes stopwords from a sentence. May return an empty string.
pub fn extract_keywords(sentence: &str) -> String {
    sentence
        .split_whitespace()
        .filter(|word| !is_stopword(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword form of `query`, or `query` itself when every token is a stopword.
pub fn keyword_query(query: &str) -> String {
    let keywords = extract_keywords(query);
    if keywords.is_empty() {
        query.to_string()
    } else {
        keywords
    }
}

fn is_stopword(word: &str) -> bool {
    let bare: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    STOPWORDS.contains(&bare.as_str())
}
