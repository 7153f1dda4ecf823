//! Keyword trigger for the web search step.

use serde::{Deserialize, Serialize};

/// Keywords that mark a question as time-sensitive.
pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "quién es",
    "último",
    "actual",
    "reciente",
    "hoy",
    "noticias",
    "fecha",
    "presidente",
    "precio",
    "clima",
];

/// Substring trigger over the lowercased question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTrigger {
    keywords: Vec<String>,
}

impl Default for SearchTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

impl SearchTrigger {
    /// Keywords are lowercased; blank ones are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn needs_web_search(&self, question: &str) -> bool {
        self.matched_keyword(question).is_some()
    }

    /// First keyword contained in the question, if any.
    pub fn matched_keyword(&self, question: &str) -> Option<&str> {
        let lowered = question.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }
}
