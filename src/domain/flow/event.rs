//! FlowEvent - discrete user actions delivered by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Name and age collected at the identification steps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub age: u32,
}

impl Identity {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Checks the field collected at the name step.
    pub fn validate_name(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(())
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    Start,
    IdentitySubmitted(Identity),
    Continue,
    AnswerSelected { answer_index: usize },
    CareerSelected { title: String },
    StoryChoiceSelected { choice_index: usize },
    Restart,
}

impl FlowEvent {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::Start => "start",
            FlowEvent::IdentitySubmitted(_) => "identity-submitted",
            FlowEvent::Continue => "continue",
            FlowEvent::AnswerSelected { .. } => "answer-selected",
            FlowEvent::CareerSelected { .. } => "career-selected",
            FlowEvent::StoryChoiceSelected { .. } => "story-choice-selected",
            FlowEvent::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(Identity::new("   ", 20).validate_name().is_err());
        assert!(Identity::new("Deniz", 0).validate_name().is_ok());
    }

    #[test]
    fn event_names_are_kebab_case() {
        assert_eq!(FlowEvent::AnswerSelected { answer_index: 0 }.name(), "answer-selected");
        assert_eq!(FlowEvent::Restart.name(), "restart");
    }
}
