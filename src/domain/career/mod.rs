//! Career module - matching accumulated traits to career paths.
//!
//! # Components
//!
//! - `CareerArchetype` - the five fixed career paths and their trait weights
//! - `CareerSuggestion` - a ranked match with a clamped percentage
//! - `CareerRanker` - pure ranking over `TraitScores`
//!
//! Everything here is a pure function of its input; no ports are involved.

mod archetype;
mod ranker;
mod suggestion;

pub use archetype::{ArchetypeProfile, CareerArchetype};
pub use ranker::{CareerRanker, INCLUSION_THRESHOLD, MAX_SUGGESTIONS, RANK_GAP};
pub use suggestion::{CareerSuggestion, MatchPercentage};
