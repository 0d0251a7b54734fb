//! FlowState - the full in-memory state of one assessment.

use serde::Serialize;

use super::{Identity, Phase};
use crate::domain::career::CareerSuggestion;
use crate::domain::narrative::NarrativeOutcome;
use crate::domain::scoring::TraitScores;

/// Snapshot of an assessment in progress.
///
/// Only `FlowMachine` mutates this; everything else reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowState {
    pub(crate) phase: Phase,
    pub(crate) identity: Identity,
    pub(crate) scores: TraitScores,
    pub(crate) question_index: usize,
    pub(crate) suggestions: Vec<CareerSuggestion>,
    pub(crate) selected_career: Option<String>,
    pub(crate) story_index: usize,
    pub(crate) outcome: Option<NarrativeOutcome>,
}

impl FlowState {
    /// State of a flow that has not been started.
    pub fn fresh() -> Self {
        Self {
            phase: Phase::Intro,
            identity: Identity::default(),
            scores: TraitScores::canonical(),
            question_index: 0,
            suggestions: Vec::new(),
            selected_career: None,
            story_index: 0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn scores(&self) -> &TraitScores {
        &self.scores
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn suggestions(&self) -> &[CareerSuggestion] {
        &self.suggestions
    }

    /// Titles of the current suggestions, best match first.
    pub fn suggestion_titles(&self) -> Vec<String> {
        self.suggestions.iter().map(|s| s.title.clone()).collect()
    }

    pub fn selected_career(&self) -> Option<&str> {
        self.selected_career.as_deref()
    }

    pub fn story_index(&self) -> usize {
        self.story_index
    }

    pub fn outcome(&self) -> Option<NarrativeOutcome> {
        self.outcome
    }

    /// Career selection needs at least one suggestion to pick from.
    pub fn career_selection_available(&self) -> bool {
        matches!(self.phase, Phase::Analysis | Phase::CareerSelection) && !self.suggestions.is_empty()
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::fresh()
    }
}
