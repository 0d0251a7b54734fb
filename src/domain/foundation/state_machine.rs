//! State machine trait for phase enums.
//!
//! Gives every enumerated lifecycle (the flow phases today) one way to
//! describe its legal edges and to validate a move along them.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their legal edges; validated transitions come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Phase {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Phase::Intro => vec![Phase::Name],
///             // ...
///         }
///     }
/// }
///
/// let next = Phase::Intro.transition_to(Phase::Name)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if a transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs the transition, returning an error if the edge does not exist.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}
