//! Debate participants and the fixed roster

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// An agent taking part in a session: display label plus model selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique, human-readable label (e.g. "GPT-4o")
    pub label: String,
    /// Selector passed to the completion provider (e.g. "gpt-4o")
    pub model: Model,
}

impl Participant {
    pub fn new(label: impl Into<String>, model: impl Into<Model>) -> Self {
        Self {
            label: label.into().trim().to_string(),
            model: model.into(),
        }
    }

    /// Whether `label` names this participant, ignoring case and padding
    pub fn answers_to(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.trim().to_lowercase()
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.model)
    }
}

/// Ordered set of debaters, fixed for the lifetime of a session
///
/// Order matters: every round polls participants in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Participant>", into = "Vec<Participant>")]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster, rejecting empty input, blank fields and duplicate labels.
    ///
    /// Labels must differ ignoring case, since agents name winners loosely.
    pub fn new(participants: Vec<Participant>) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }

        for (i, participant) in participants.iter().enumerate() {
            if participant.label.is_empty() {
                return Err(DomainError::EmptyLabel);
            }
            if participant.model.is_empty() {
                return Err(DomainError::EmptyModel(participant.label.clone()));
            }
            if participants[..i].iter().any(|p| p.answers_to(&participant.label)) {
                return Err(DomainError::DuplicateParticipant(participant.label.clone()));
            }
        }

        Ok(Self { participants })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.label.clone()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.label == label)
    }

    /// Resolve a label the way an agent might spell it (case-insensitive)
    pub fn find_ignore_case(&self, label: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.answers_to(label))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            participants: vec![
                Participant::new("GPT-5", "gpt-5"),
                Participant::new("GPT-4o", "gpt-4o"),
                Participant::new("GPT-41", "gpt-4.1"),
            ],
        }
    }
}

impl TryFrom<Vec<Participant>> for Roster {
    type Error = DomainError;

    fn try_from(participants: Vec<Participant>) -> Result<Self, Self::Error> {
        Roster::new(participants)
    }
}

impl From<Roster> for Vec<Participant> {
    fn from(roster: Roster) -> Self {
        roster.participants
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}
