//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No participants configured for the debate")]
    NoParticipants,

    #[error("Duplicate participant label: {0}")]
    DuplicateParticipant(String),

    #[error("Participant label cannot be empty")]
    EmptyLabel,

    #[error("Model selector for {0} cannot be empty")]
    EmptyModel(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Maximum debate rounds must be at least 1 (got {0})")]
    InvalidMaxRounds(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::DuplicateParticipant("Atlas".to_string()).to_string(),
            "Duplicate participant label: Atlas"
        );
        assert_eq!(
            DomainError::NoParticipants.to_string(),
            "No participants configured for the debate"
        );
    }
}
