//! Scoring module - trait accumulation.
//!
//! - `TraitScores` - open, insertion-ordered trait → score mapping
//! - `apply_delta` - pure merge of an answer's or choice's score delta

mod engine;
mod trait_scores;

pub use engine::apply_delta;
pub use trait_scores::{TraitScores, CANONICAL_TRAITS};
