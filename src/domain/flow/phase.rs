//! Phase - the enumerated steps of the assessment flow.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Step of the assessment flow.
///
/// Serialized names are the persisted `current_step` values. The aliases
/// accept records written before the psychologist and quiz steps were
/// renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[default]
    Intro,
    Name,
    Age,
    #[serde(alias = "psychologist")]
    PsychologistIntro,
    #[serde(alias = "questions")]
    Quiz,
    Analysis,
    CareerSelection,
    Story,
    Results,
}

impl Phase {
    /// Every phase in flow order.
    pub const ALL: [Phase; 9] = [
        Phase::Intro,
        Phase::Name,
        Phase::Age,
        Phase::PsychologistIntro,
        Phase::Quiz,
        Phase::Analysis,
        Phase::CareerSelection,
        Phase::Story,
        Phase::Results,
    ];

    /// Persisted name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Name => "name",
            Phase::Age => "age",
            Phase::PsychologistIntro => "psychologist-intro",
            Phase::Quiz => "quiz",
            Phase::Analysis => "analysis",
            Phase::CareerSelection => "career-selection",
            Phase::Story => "story",
            Phase::Results => "results",
        }
    }

    /// True once the quiz is complete and career suggestions exist.
    pub fn has_suggestions(&self) -> bool {
        matches!(
            self,
            Phase::Analysis | Phase::CareerSelection | Phase::Story | Phase::Results
        )
    }
}

impl StateMachine for Phase {
    /// Restart makes `Intro` reachable from every phase.
    fn valid_transitions(&self) -> Vec<Self> {
        use Phase::*;
        match self {
            Intro => vec![Name, Intro],
            Name => vec![Age, Intro],
            Age => vec![PsychologistIntro, Intro],
            PsychologistIntro => vec![Quiz, Intro],
            Quiz => vec![Quiz, Analysis, Intro],
            Analysis => vec![CareerSelection, Story, Intro],
            CareerSelection => vec![Story, Intro],
            Story => vec![Story, Results, Intro],
            Results => vec![Intro],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
