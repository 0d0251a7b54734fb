//! FlowView - read-only projection handed to the presentation layer.

use serde::Serialize;

use super::{FlowContent, FlowState, Identity, Phase};
use crate::domain::career::CareerSuggestion;
use crate::domain::narrative::NarrativeOutcome;
use crate::domain::scoring::{TraitScores, CANONICAL_TRAITS};

/// Score above which a trait reads as a strength.
pub const HIGH_LEVEL_THRESHOLD: f64 = 40.0;
/// Score above which a trait reads as average.
pub const AVERAGE_LEVEL_THRESHOLD: f64 = 25.0;

/// Qualitative reading of one trait score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitLevel {
    High,
    Average,
    Developing,
}

impl TraitLevel {
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_LEVEL_THRESHOLD {
            TraitLevel::High
        } else if score > AVERAGE_LEVEL_THRESHOLD {
            TraitLevel::Average
        } else {
            TraitLevel::Developing
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TraitLevel::High => "a clear strength",
            TraitLevel::Average => "solid, with room to grow",
            TraitLevel::Developing => "worth developing further",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitAssessment {
    pub name: String,
    pub score: f64,
    pub level: TraitLevel,
}

/// The psychologist's reading shown after the quiz, one entry per canonical trait.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub greeting: String,
    pub traits: Vec<TraitAssessment>,
}

impl AnalysisSummary {
    pub fn build(identity: &Identity, scores: &TraitScores) -> Self {
        let greeting = if identity.name.is_empty() {
            "Here is what your answers say about you.".to_string()
        } else {
            format!("{}, here is what your answers say about you.", identity.name)
        };
        let traits = CANONICAL_TRAITS
            .iter()
            .map(|name| {
                let score = scores.value(name);
                TraitAssessment {
                    name: name.to_string(),
                    score,
                    level: TraitLevel::from_score(score),
                }
            })
            .collect();
        Self { greeting, traits }
    }
}

/// The current quiz question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    /// 1-based position.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceView {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
}

/// The current story part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryView {
    pub number: usize,
    pub total: usize,
    pub dimension: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub choices: Vec<ChoiceView>,
}

/// Final verdict of the story.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub outcome: NarrativeOutcome,
    pub headline: String,
    pub description: String,
}

impl ResultView {
    fn build(outcome: NarrativeOutcome, career: Option<&str>) -> Self {
        let career = career.unwrap_or("this career");
        let (headline, description) = match outcome {
            NarrativeOutcome::Passed => (
                "Congratulations!".to_string(),
                format!("You handled the day like a real {}.", career),
            ),
            NarrativeOutcome::Failed => (
                "Not quite yet".to_string(),
                format!("Becoming a {} takes practice. Try the story again.", career),
            ),
        };
        Self {
            outcome,
            headline,
            description,
        }
    }
}

/// Everything the presentation layer needs to render the current phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowView {
    pub phase: Phase,
    pub identity: Identity,
    pub scores: TraitScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisSummary>,
    pub suggestions: Vec<CareerSuggestion>,
    pub career_selection_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_career: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<StoryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

impl FlowView {
    pub fn build(state: &FlowState, content: &FlowContent) -> Self {
        let question = (state.phase == Phase::Quiz)
            .then(|| content.questions().get(state.question_index))
            .flatten()
            .map(|q| QuestionView {
                number: state.question_index + 1,
                total: content.questions().len(),
                prompt: q.prompt.clone(),
                answers: q.answers.iter().map(|a| a.text.clone()).collect(),
            });

        let analysis = matches!(state.phase, Phase::Analysis | Phase::CareerSelection)
            .then(|| AnalysisSummary::build(&state.identity, &state.scores));

        let narrative = content.narrative();
        let story = (state.phase == Phase::Story)
            .then(|| narrative.part(state.story_index))
            .flatten()
            .map(|part| StoryView {
                number: state.story_index + 1,
                total: narrative.len(),
                dimension: part.dimension.clone(),
                title: part.title.clone(),
                description: part.description.clone(),
                image: part.image.clone(),
                choices: part
                    .choices
                    .iter()
                    .map(|c| ChoiceView {
                        text: c.text.clone(),
                        consequence: c.consequence.clone(),
                    })
                    .collect(),
            });

        let result = match (state.phase, state.outcome) {
            (Phase::Results, Some(outcome)) => {
                Some(ResultView::build(outcome, state.selected_career.as_deref()))
            }
            _ => None,
        };

        Self {
            phase: state.phase,
            identity: state.identity.clone(),
            scores: state.scores.clone(),
            question,
            analysis,
            suggestions: state.suggestions.clone(),
            career_selection_available: state.career_selection_available(),
            selected_career: state.selected_career.clone(),
            story,
            result,
        }
    }
}
