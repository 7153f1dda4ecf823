//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question posed to the assistant (Value Object)
///
/// The content is stored trimmed and is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting blank input
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Try to create a new question, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        Self::new(content).ok()
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}
