//! Flow error types.

use thiserror::Error;

use super::Phase;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::narrative::NarrativeError;

/// An event the current state cannot accept.
///
/// These are caller bugs: the machine leaves its state untouched when it
/// returns one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("Event '{event}' is not accepted in phase '{phase}'")]
    UnexpectedEvent { phase: Phase, event: &'static str },

    #[error("Answer {index} does not exist ({available} available)")]
    UnknownAnswer { index: usize, available: usize },

    #[error("Career '{0}' is not among the current suggestions")]
    UnknownCareer(String),

    #[error("Story choice {index} does not exist ({available} available)")]
    UnknownStoryChoice { index: usize, available: usize },

    #[error("No career suggestions to choose from")]
    NoCareerSuggestions,

    #[error("Invalid identity: {0}")]
    InvalidIdentity(#[from] ValidationError),

    #[error("Narrative error: {0}")]
    Narrative(#[from] NarrativeError),
}

impl FlowError {
    pub fn unexpected(phase: Phase, event: &'static str) -> Self {
        FlowError::UnexpectedEvent { phase, event }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::UnexpectedEvent { .. } => ErrorCode::UnexpectedEvent,
            FlowError::UnknownAnswer { .. } => ErrorCode::UnknownAnswer,
            FlowError::UnknownCareer(_) => ErrorCode::UnknownCareer,
            FlowError::UnknownStoryChoice { .. } => ErrorCode::UnknownStoryChoice,
            FlowError::NoCareerSuggestions => ErrorCode::NoCareerSuggestions,
            FlowError::InvalidIdentity(ValidationError::EmptyField { .. }) => ErrorCode::EmptyField,
            FlowError::InvalidIdentity(ValidationError::InvalidFormat { .. }) => {
                ErrorCode::InvalidFormat
            }
            FlowError::Narrative(_) => ErrorCode::InvalidContent,
        }
    }
}

impl From<FlowError> for DomainError {
    fn from(err: FlowError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            FlowError::UnexpectedEvent { phase, event } => domain
                .with_detail("phase", phase.as_str())
                .with_detail("event", event),
            FlowError::UnknownAnswer { index, available }
            | FlowError::UnknownStoryChoice { index, available } => domain
                .with_detail("index", index.to_string())
                .with_detail("available", available.to_string()),
            FlowError::UnknownCareer(title) => domain.with_detail("career", title),
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_event_names_phase_and_event() {
        let err = FlowError::unexpected(Phase::Quiz, "start");
        assert_eq!(err.to_string(), "Event 'start' is not accepted in phase 'quiz'");
        assert_eq!(err.code(), ErrorCode::UnexpectedEvent);
    }

    #[test]
    fn converts_to_domain_error_with_code() {
        let err: DomainError = FlowError::UnknownCareer("Astronaut".to_string()).into();
        assert_eq!(err.code, ErrorCode::UnknownCareer);
        assert!(err.message.contains("Astronaut"));
        assert_eq!(err.details.get("career").map(String::as_str), Some("Astronaut"));
    }

    #[test]
    fn blank_name_maps_to_empty_field() {
        let err = FlowError::from(ValidationError::empty_field("name"));
        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[test]
    fn unexpected_event_renders_as_json_with_details() {
        let err: DomainError = FlowError::unexpected(Phase::Quiz, "start").into();
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "UNEXPECTED_EVENT");
        assert_eq!(json["message"], "Event 'start' is not accepted in phase 'quiz'");
        assert_eq!(json["details"]["phase"], "quiz");
        assert_eq!(json["details"]["event"], "start");
    }
}
