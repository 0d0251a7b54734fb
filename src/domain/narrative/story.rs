//! Story content - parts, choices and the addressable narrative.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::NarrativeError;
use crate::domain::scoring::TraitScores;

/// Success threshold used when a narrative does not declare one.
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 10.0;

fn default_tracked_traits() -> Vec<String> {
    vec!["analysis".to_string(), "communication".to_string()]
}

fn default_success_threshold() -> f64 {
    DEFAULT_SUCCESS_THRESHOLD
}

/// One selectable option inside a story part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryChoice {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<TraitScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_dimension: Option<String>,
}

/// A node of the story, addressed by its dimension key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPart {
    pub dimension: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub choices: Vec<StoryChoice>,
}

/// How the next part is chosen after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeMode {
    /// Advance by list position; the last part ends the story.
    #[default]
    Linear,
    /// Follow `next_dimension`; a choice without one ends the story.
    Graph,
}

/// Serialized shape of a narrative, validated into [`Narrative`].
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeDefinition {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub mode: NarrativeMode,
    #[serde(default = "default_tracked_traits")]
    pub tracked_traits: Vec<String>,
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,
    pub parts: Vec<StoryPart>,
}

/// A validated story: ordered parts plus a dimension → index table.
///
/// # Invariants
///
/// - At least one part, every part offers at least one choice
/// - Dimension keys are non-empty and unique
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "NarrativeDefinition")]
pub struct Narrative {
    key: String,
    title: String,
    mode: NarrativeMode,
    tracked_traits: Vec<String>,
    success_threshold: f64,
    parts: Vec<StoryPart>,
    dimension_index: HashMap<String, usize>,
}

impl Narrative {
    /// Validates a definition and builds the lookup table.
    pub fn new(definition: NarrativeDefinition) -> Result<Self, NarrativeError> {
        let NarrativeDefinition {
            key,
            title,
            mode,
            tracked_traits,
            success_threshold,
            parts,
        } = definition;

        if parts.is_empty() {
            return Err(NarrativeError::EmptyNarrative { key });
        }

        let mut dimension_index = HashMap::with_capacity(parts.len());
        for (position, part) in parts.iter().enumerate() {
            if part.dimension.trim().is_empty() {
                return Err(NarrativeError::EmptyDimension { key, position });
            }
            if part.choices.is_empty() {
                return Err(NarrativeError::PartWithoutChoices {
                    key,
                    dimension: part.dimension.clone(),
                });
            }
            if dimension_index.insert(part.dimension.clone(), position).is_some() {
                return Err(NarrativeError::DuplicateDimension {
                    key,
                    dimension: part.dimension.clone(),
                });
            }
        }

        Ok(Self {
            key,
            title,
            mode,
            tracked_traits,
            success_threshold,
            parts,
            dimension_index,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mode(&self) -> NarrativeMode {
        self.mode
    }

    /// Traits this narrative merges from choices and sums for its outcome.
    pub fn tracked_traits(&self) -> &[String] {
        &self.tracked_traits
    }

    pub fn success_threshold(&self) -> f64 {
        self.success_threshold
    }

    pub fn parts(&self) -> &[StoryPart] {
        &self.parts
    }

    /// Returns the part at `index`, if any.
    pub fn part(&self, index: usize) -> Option<&StoryPart> {
        self.parts.get(index)
    }

    /// Number of parts (always at least one).
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Index of the last part.
    pub fn last_index(&self) -> usize {
        self.parts.len() - 1
    }

    /// Looks up a part position by its dimension key.
    pub fn index_of(&self, dimension: &str) -> Option<usize> {
        self.dimension_index.get(dimension).copied()
    }
}

impl TryFrom<NarrativeDefinition> for Narrative {
    type Error = NarrativeError;

    fn try_from(definition: NarrativeDefinition) -> Result<Self, Self::Error> {
        Narrative::new(definition)
    }
}
