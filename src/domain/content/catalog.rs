//! ContentCatalog - the static question and story tables.
//!
//! The built-in catalog is embedded via `include_str!` and parsed once.
//! Other catalogs can be built from YAML for tests or alternative content.

use once_cell::sync::Lazy;
use thiserror::Error;

use super::Question;
use crate::domain::narrative::Narrative;

const BUILTIN_QUESTIONS: &str = include_str!("data/questions.yaml");
const BUILTIN_NARRATIVES: &str = include_str!("data/narratives.yaml");

static BUILTIN: Lazy<Result<ContentCatalog, ContentError>> =
    Lazy::new(|| ContentCatalog::from_yaml(BUILTIN_QUESTIONS, BUILTIN_NARRATIVES));

/// Errors raised while loading content tables.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Failed to parse {table}: {reason}")]
    Parse { table: &'static str, reason: String },

    #[error("Catalog has no questions")]
    NoQuestions,

    #[error("Question {index} has no answers")]
    QuestionWithoutAnswers { index: usize },

    #[error("Catalog has no narratives")]
    NoNarratives,

    #[error("Narrative '{0}' is defined twice")]
    DuplicateNarrative(String),

    #[error("Narrative '{0}' not found")]
    UnknownNarrative(String),
}

/// Read-only question and narrative tables.
///
/// # Invariants
///
/// - At least one question, every question has at least one answer
/// - At least one narrative, keys unique; the first one is the default
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    questions: Vec<Question>,
    narratives: Vec<Narrative>,
}

impl ContentCatalog {
    /// Builds a catalog from already parsed tables.
    pub fn new(questions: Vec<Question>, narratives: Vec<Narrative>) -> Result<Self, ContentError> {
        if questions.is_empty() {
            return Err(ContentError::NoQuestions);
        }
        if let Some(index) = questions.iter().position(|q| q.answers.is_empty()) {
            return Err(ContentError::QuestionWithoutAnswers { index });
        }
        if narratives.is_empty() {
            return Err(ContentError::NoNarratives);
        }
        for (i, narrative) in narratives.iter().enumerate() {
            if narratives[..i].iter().any(|n| n.key() == narrative.key()) {
                return Err(ContentError::DuplicateNarrative(narrative.key().to_string()));
            }
        }

        Ok(Self {
            questions,
            narratives,
        })
    }

    /// Parses both tables from YAML sequences.
    pub fn from_yaml(questions: &str, narratives: &str) -> Result<Self, ContentError> {
        let questions: Vec<Question> =
            serde_yaml::from_str(questions).map_err(|e| ContentError::Parse {
                table: "questions",
                reason: e.to_string(),
            })?;
        let narratives: Vec<Narrative> =
            serde_yaml::from_str(narratives).map_err(|e| ContentError::Parse {
                table: "narratives",
                reason: e.to_string(),
            })?;
        Self::new(questions, narratives)
    }

    /// Returns the embedded catalog.
    pub fn builtin() -> Result<&'static ContentCatalog, ContentError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn narratives(&self) -> &[Narrative] {
        &self.narratives
    }

    /// The first narrative of the table.
    pub fn default_narrative(&self) -> &Narrative {
        &self.narratives[0]
    }

    /// Looks a narrative up by key.
    pub fn narrative(&self, key: &str) -> Result<&Narrative, ContentError> {
        self.narratives
            .iter()
            .find(|n| n.key() == key)
            .ok_or_else(|| ContentError::UnknownNarrative(key.to_string()))
    }
}
