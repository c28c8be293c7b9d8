//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user submission to be debated (Value Object)
///
/// Represents the input query that every debater answers in round 1 and
/// that the judge and writer see again when closing the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Create a question, reporting blank input as a domain error
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::try_new(content)
            .ok_or_else(|| DomainError::InvalidQuestion("question cannot be empty".to_string()))
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

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_try_from_str() {
        let q = Question::try_from("What is Rust?").unwrap();
        assert_eq!(q.content(), "What is Rust?");
    }

    #[test]
    fn test_blank_question_conversion_is_error() {
        assert!(matches!(
            Question::try_from(""),
            Err(DomainError::InvalidQuestion(_))
        ));
        assert!(matches!(
            Question::try_from("\t \n".to_string()),
            Err(DomainError::InvalidQuestion(_))
        ));
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
    }

    #[test]
    fn test_try_new_valid() {
        assert!(Question::try_new("What is Rust?").is_some());
    }

    #[test]
    fn test_parse_blank_is_error() {
        assert!(matches!(
            Question::parse("  \n"),
            Err(DomainError::InvalidQuestion(_))
        ));
        assert_eq!(Question::parse("Why?").unwrap().content(), "Why?");
    }
}
