//! Persisted progress record and the partial patches that update it.

use serde::{Deserialize, Serialize};

use crate::domain::flow::Phase;
use crate::domain::foundation::Timestamp;
use crate::domain::narrative::NarrativeOutcome;
use crate::domain::scoring::TraitScores;

/// Everything stored for one user between sessions.
///
/// Missing fields deserialize to their fresh-flow defaults, so partially
/// written records load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default = "TraitScores::canonical")]
    pub scores: TraitScores,
    #[serde(default)]
    pub selected_career: Option<String>,
    #[serde(default)]
    pub current_story_part: usize,
    #[serde(default)]
    pub current_step: Phase,
    #[serde(default)]
    pub career_suggestions: Vec<String>,
    #[serde(default)]
    pub current_question: usize,
    #[serde(default)]
    pub outcome: Option<NarrativeOutcome>,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            scores: TraitScores::canonical(),
            selected_career: None,
            current_story_part: 0,
            current_step: Phase::Intro,
            career_suggestions: Vec::new(),
            current_question: 0,
            outcome: None,
            updated_at: Timestamp::now(),
        }
    }
}

impl ProgressRecord {
    /// Builds a record from a first patch, defaulting what it omits.
    pub fn from_patch(patch: &ProgressPatch) -> Self {
        let mut record = Self::default();
        record.apply(patch);
        record
    }

    /// Merges a patch: present keys overwrite, absent keys are kept.
    pub fn apply(&mut self, patch: &ProgressPatch) {
        if let Some(scores) = &patch.scores {
            self.scores = scores.clone();
        }
        if let Some(selected_career) = &patch.selected_career {
            self.selected_career = selected_career.clone();
        }
        if let Some(part) = patch.current_story_part {
            self.current_story_part = part;
        }
        if let Some(step) = patch.current_step {
            self.current_step = step;
        }
        if let Some(suggestions) = &patch.career_suggestions {
            self.career_suggestions = suggestions.clone();
        }
        if let Some(question) = patch.current_question {
            self.current_question = question;
        }
        if let Some(outcome) = patch.outcome {
            self.outcome = outcome;
        }
        self.updated_at = Timestamp::now();
    }
}

/// The persisted fields changed by one transition.
///
/// `None` means "leave as stored". The nullable fields use a nested option
/// so a patch can explicitly clear them: `Some(None)` writes an empty value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressPatch {
    pub scores: Option<TraitScores>,
    pub selected_career: Option<Option<String>>,
    pub current_story_part: Option<usize>,
    pub current_step: Option<Phase>,
    pub career_suggestions: Option<Vec<String>>,
    pub current_question: Option<usize>,
    pub outcome: Option<Option<NarrativeOutcome>>,
}

impl ProgressPatch {
    pub fn step(phase: Phase) -> Self {
        Self {
            current_step: Some(phase),
            ..Self::default()
        }
    }

    /// Patch that returns every field to the fresh-flow state.
    pub fn reset() -> Self {
        Self {
            scores: Some(TraitScores::canonical()),
            selected_career: Some(None),
            current_story_part: Some(0),
            current_step: Some(Phase::Intro),
            career_suggestions: Some(Vec::new()),
            current_question: Some(0),
            outcome: Some(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut record = ProgressRecord {
            selected_career: Some("Backend Developer".to_string()),
            current_story_part: 2,
            current_step: Phase::Story,
            ..ProgressRecord::default()
        };

        record.apply(&ProgressPatch {
            current_story_part: Some(3),
            ..ProgressPatch::default()
        });

        assert_eq!(record.current_story_part, 3);
        assert_eq!(record.current_step, Phase::Story);
        assert_eq!(record.selected_career.as_deref(), Some("Backend Developer"));
    }

    #[test]
    fn explicit_none_clears_nullable_fields() {
        let mut record = ProgressRecord {
            selected_career: Some("Data Scientist".to_string()),
            outcome: Some(NarrativeOutcome::Passed),
            ..ProgressRecord::default()
        };

        record.apply(&ProgressPatch {
            selected_career: Some(None),
            outcome: Some(None),
            ..ProgressPatch::default()
        });

        assert!(record.selected_career.is_none());
        assert!(record.outcome.is_none());
    }

    #[test]
    fn reset_patch_restores_fresh_state() {
        let mut record = ProgressRecord {
            scores: TraitScores::canonical().with("analysis", 30.0),
            selected_career: Some("Data Scientist".to_string()),
            current_story_part: 3,
            current_step: Phase::Results,
            career_suggestions: vec!["Data Scientist".to_string()],
            current_question: 7,
            outcome: Some(NarrativeOutcome::Failed),
            ..ProgressRecord::default()
        };

        record.apply(&ProgressPatch::reset());

        let fresh = ProgressRecord::default();
        assert_eq!(record.scores, fresh.scores);
        assert_eq!(record.selected_career, fresh.selected_career);
        assert_eq!(record.current_story_part, 0);
        assert_eq!(record.current_step, Phase::Intro);
        assert!(record.career_suggestions.is_empty());
        assert_eq!(record.current_question, 0);
        assert!(record.outcome.is_none());
    }

    #[test]
    fn from_patch_defaults_missing_fields() {
        let record = ProgressRecord::from_patch(&ProgressPatch::step(Phase::Name));
        assert_eq!(record.current_step, Phase::Name);
        assert_eq!(record.scores, TraitScores::canonical());
    }

    #[test]
    fn partial_yaml_deserializes_with_defaults() {
        let record: ProgressRecord = serde_yaml::from_str("current_step: questions\n").unwrap();
        assert_eq!(record.current_step, Phase::Quiz);
        assert_eq!(record.scores, TraitScores::canonical());
        assert_eq!(record.current_question, 0);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ProgressPatch::default().is_empty());
        assert!(!ProgressPatch::step(Phase::Age).is_empty());
    }
}
