//! Quiz questions and answers.

use serde::{Deserialize, Serialize};

use crate::domain::scoring::TraitScores;

/// One selectable answer with its sparse score delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub score: TraitScores,
}

/// A quiz question with its ordered answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl Question {
    /// Returns the answer at `index`, if any.
    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }
}
