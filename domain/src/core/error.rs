//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_question_display() {
        let error = DomainError::InvalidQuestion("question cannot be empty".to_string());
        assert_eq!(error.to_string(), "Invalid question: question cannot be empty");
    }
}
