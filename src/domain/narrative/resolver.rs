//! Narrative Resolver - advancing through a story and deciding its outcome.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Narrative, NarrativeError, NarrativeMode, StoryChoice};
use crate::domain::scoring::{apply_delta, TraitScores};

/// Pass/fail verdict of a finished narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeOutcome {
    Passed,
    Failed,
}

impl NarrativeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, NarrativeOutcome::Passed)
    }
}

/// Result of taking one story choice.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeStep {
    /// Position of the part to show next (unchanged when terminal).
    pub index: usize,
    /// Scores after merging the choice's tracked deltas.
    pub scores: TraitScores,
    /// True when the story has ended.
    pub terminal: bool,
    /// Set exactly when `terminal` is true.
    pub outcome: Option<NarrativeOutcome>,
}

/// Narrative walking functions.
pub struct NarrativeResolver;

impl NarrativeResolver {
    /// Applies `choice`, taken on the part at `index`.
    ///
    /// # Algorithm
    /// 1. Merge the choice's delta, restricted to the narrative's tracked traits
    /// 2. Linear mode: move one part forward; the last part is terminal
    /// 3. Graph mode: follow `next_dimension`; no `next_dimension` is terminal
    /// 4. On terminal, compute the outcome from the merged scores
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `index` does not address a part
    pub fn advance(
        narrative: &Narrative,
        index: usize,
        choice: &StoryChoice,
        scores: &TraitScores,
    ) -> Result<NarrativeStep, NarrativeError> {
        if index >= narrative.len() {
            return Err(NarrativeError::IndexOutOfRange {
                index,
                len: narrative.len(),
            });
        }

        let scores = match &choice.score {
            Some(delta) => apply_delta(scores, &delta.restricted_to(narrative.tracked_traits())),
            None => scores.clone(),
        };

        let next = match narrative.mode() {
            NarrativeMode::Linear => (index < narrative.last_index()).then_some(index + 1),
            NarrativeMode::Graph => choice
                .next_dimension
                .as_deref()
                .map(|dimension| Self::resolve_dimension(narrative, dimension)),
        };

        let step = match next {
            Some(next_index) => NarrativeStep {
                index: next_index,
                scores,
                terminal: false,
                outcome: None,
            },
            None => {
                let outcome = Self::outcome(narrative, &scores);
                NarrativeStep {
                    index,
                    scores,
                    terminal: true,
                    outcome: Some(outcome),
                }
            }
        };

        debug!(
            narrative = narrative.key(),
            from = index,
            to = step.index,
            terminal = step.terminal,
            "Advanced narrative"
        );
        Ok(step)
    }

    /// Finds the part for a dimension key.
    ///
    /// An unknown key falls back to the first part rather than failing.
    pub fn resolve_dimension(narrative: &Narrative, dimension: &str) -> usize {
        narrative.index_of(dimension).unwrap_or_else(|| {
            warn!(
                narrative = narrative.key(),
                dimension, "Unknown story dimension, falling back to first part"
            );
            0
        })
    }

    /// Passed iff the tracked traits sum to at least the success threshold.
    pub fn outcome(narrative: &Narrative, scores: &TraitScores) -> NarrativeOutcome {
        let total: f64 = narrative
            .tracked_traits()
            .iter()
            .map(|name| scores.value(name))
            .sum();

        if total >= narrative.success_threshold() {
            NarrativeOutcome::Passed
        } else {
            NarrativeOutcome::Failed
        }
    }
}
