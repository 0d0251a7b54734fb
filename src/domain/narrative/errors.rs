//! Narrative error types.

use thiserror::Error;

/// Errors raised while validating or walking a narrative.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NarrativeError {
    #[error("Narrative '{key}' has no parts")]
    EmptyNarrative { key: String },

    #[error("Narrative '{key}' has a part with an empty dimension at position {position}")]
    EmptyDimension { key: String, position: usize },

    #[error("Narrative '{key}' has duplicate dimension '{dimension}'")]
    DuplicateDimension { key: String, dimension: String },

    #[error("Narrative '{key}' part '{dimension}' offers no choices")]
    PartWithoutChoices { key: String, dimension: String },

    #[error("Story index {index} is outside a narrative of {len} parts")]
    IndexOutOfRange { index: usize, len: usize },
}
