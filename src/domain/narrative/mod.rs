//! Narrative module - branching story walked after career selection.
//!
//! Stories are held as an ordered list of parts plus a dimension → index
//! table, so linear and graph narratives share one resolver.

mod errors;
mod resolver;
mod story;

pub use errors::NarrativeError;
pub use resolver::{NarrativeOutcome, NarrativeResolver, NarrativeStep};
pub use story::{
    Narrative, NarrativeDefinition, NarrativeMode, StoryChoice, StoryPart,
    DEFAULT_SUCCESS_THRESHOLD,
};
