//! FlowMachine - the assessment state machine.
//!
//! One pure transition function over `FlowState`. Every accepted event
//! produces a `Transition` carrying the persisted fields it changed; a
//! rejected event leaves the state exactly as it was.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{FlowError, FlowEvent, FlowState, FlowView, Identity, Phase};
use crate::domain::career::CareerRanker;
use crate::domain::content::{ContentCatalog, ContentError, Question};
use crate::domain::foundation::StateMachine;
use crate::domain::narrative::{Narrative, NarrativeError, NarrativeResolver};
use crate::domain::progress::{ProgressPatch, ProgressRecord};
use crate::domain::scoring::apply_delta;

/// The question list and narrative one flow runs over.
#[derive(Debug, Clone)]
pub struct FlowContent {
    questions: Vec<Question>,
    narrative: Narrative,
}

impl FlowContent {
    pub fn new(questions: Vec<Question>, narrative: Narrative) -> Result<Self, ContentError> {
        if questions.is_empty() {
            return Err(ContentError::NoQuestions);
        }
        if let Some(index) = questions.iter().position(|q| q.answers.is_empty()) {
            return Err(ContentError::QuestionWithoutAnswers { index });
        }
        Ok(Self {
            questions,
            narrative,
        })
    }

    /// Takes every question and one narrative from a catalog.
    ///
    /// `None` selects the catalog's default narrative.
    pub fn from_catalog(
        catalog: &ContentCatalog,
        narrative_key: Option<&str>,
    ) -> Result<Self, ContentError> {
        let narrative = match narrative_key {
            Some(key) => catalog.narrative(key)?,
            None => catalog.default_narrative(),
        };
        Self::new(catalog.questions().to_vec(), narrative.clone())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn narrative(&self) -> &Narrative {
        &self.narrative
    }
}

/// An accepted event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Persisted fields changed by the event.
    pub patch: ProgressPatch,
}

/// Drives one assessment.
#[derive(Debug, Clone)]
pub struct FlowMachine {
    content: Arc<FlowContent>,
    state: FlowState,
}

impl FlowMachine {
    pub fn new(content: Arc<FlowContent>) -> Self {
        Self {
            content,
            state: FlowState::fresh(),
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn content(&self) -> &FlowContent {
        &self.content
    }

    pub fn view(&self) -> FlowView {
        FlowView::build(&self.state, &self.content)
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// Any `FlowError`; the state is unchanged in that case.
    pub fn apply(&mut self, event: FlowEvent) -> Result<Transition, FlowError> {
        let from = self.state.phase;
        let result = self.next(&event).and_then(|(next, patch)| {
            from.transition_to(next.phase)
                .map_err(|_| FlowError::unexpected(from, event.name()))?;
            Ok((next, patch))
        });

        match result {
            Ok((next, patch)) => {
                let to = next.phase;
                self.state = next;
                debug!(from = %from, to = %to, event = event.name(), "Flow transition");
                Ok(Transition { from, to, patch })
            }
            Err(err) => {
                warn!(phase = %from, event = event.name(), error = %err, "Rejected flow event");
                Err(err)
            }
        }
    }

    /// Replaces the state with a persisted record.
    ///
    /// Suggestions are recomputed from the stored scores rather than
    /// trusted. Indices that no longer fit the content fall back to 0.
    /// Identity is not persisted and carries over from the current state.
    pub fn restore(&mut self, record: &ProgressRecord) {
        let phase = record.current_step;
        let narrative = self.content.narrative();

        let question_index = if record.current_question < self.content.questions.len() {
            record.current_question
        } else {
            warn!(
                index = record.current_question,
                "Stored question index out of range, restarting quiz at first question"
            );
            0
        };

        let story_index = if record.current_story_part < narrative.len() {
            record.current_story_part
        } else {
            warn!(
                index = record.current_story_part,
                narrative = narrative.key(),
                "Stored story part out of range, falling back to first part"
            );
            0
        };

        let suggestions = if phase.has_suggestions() {
            CareerRanker::rank(&record.scores)
        } else {
            Vec::new()
        };

        let outcome = match phase {
            Phase::Results => record
                .outcome
                .or_else(|| Some(NarrativeResolver::outcome(narrative, &record.scores))),
            _ => None,
        };

        self.state = FlowState {
            phase,
            identity: self.state.identity.clone(),
            scores: record.scores.clone(),
            question_index,
            suggestions,
            selected_career: record.selected_career.clone(),
            story_index,
            outcome,
        };
        debug!(phase = %phase, "Restored flow from stored progress");
    }

    /// Carries a known identity into the flow without walking the identity steps.
    pub fn set_identity(&mut self, identity: Identity) {
        self.state.identity = identity;
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    fn next(&self, event: &FlowEvent) -> Result<(FlowState, ProgressPatch), FlowError> {
        let mut next = self.state.clone();

        let patch = match (self.state.phase, event) {
            (_, FlowEvent::Restart) => {
                next = FlowState::fresh();
                ProgressPatch::reset()
            }
            (Phase::Intro, FlowEvent::Start) => {
                next.phase = Phase::Name;
                ProgressPatch::step(Phase::Name)
            }
            (Phase::Name, FlowEvent::IdentitySubmitted(identity)) => {
                identity.validate_name()?;
                next.identity.name = identity.name.trim().to_string();
                next.phase = Phase::Age;
                ProgressPatch::step(Phase::Age)
            }
            (Phase::Age, FlowEvent::IdentitySubmitted(identity)) => {
                next.identity.age = identity.age;
                next.phase = Phase::PsychologistIntro;
                ProgressPatch::step(Phase::PsychologistIntro)
            }
            (Phase::PsychologistIntro, FlowEvent::Continue) => {
                next.phase = Phase::Quiz;
                next.question_index = 0;
                ProgressPatch {
                    current_step: Some(Phase::Quiz),
                    current_question: Some(0),
                    ..ProgressPatch::default()
                }
            }
            (Phase::Quiz, FlowEvent::AnswerSelected { answer_index }) => {
                self.answer(&mut next, *answer_index)?
            }
            (Phase::Analysis, FlowEvent::Continue) => {
                if next.suggestions.is_empty() {
                    return Err(FlowError::NoCareerSuggestions);
                }
                next.phase = Phase::CareerSelection;
                ProgressPatch::step(Phase::CareerSelection)
            }
            (Phase::Analysis | Phase::CareerSelection, FlowEvent::CareerSelected { title }) => {
                self.select_career(&mut next, title)?
            }
            (Phase::Story, FlowEvent::StoryChoiceSelected { choice_index }) => {
                self.choose(&mut next, *choice_index)?
            }
            (phase, event) => return Err(FlowError::unexpected(phase, event.name())),
        };

        Ok((next, patch))
    }

    fn answer(&self, next: &mut FlowState, answer_index: usize) -> Result<ProgressPatch, FlowError> {
        let questions = &self.content.questions;
        let question = questions
            .get(next.question_index)
            .ok_or_else(|| FlowError::unexpected(Phase::Quiz, "answer-selected"))?;
        let answer = question
            .answer(answer_index)
            .ok_or(FlowError::UnknownAnswer {
                index: answer_index,
                available: question.answers.len(),
            })?;

        next.scores = apply_delta(&next.scores, &answer.score);

        if next.question_index + 1 < questions.len() {
            next.question_index += 1;
            return Ok(ProgressPatch {
                scores: Some(next.scores.clone()),
                current_question: Some(next.question_index),
                ..ProgressPatch::default()
            });
        }

        next.suggestions = CareerRanker::rank(&next.scores);
        next.phase = Phase::Analysis;
        Ok(ProgressPatch {
            scores: Some(next.scores.clone()),
            current_step: Some(Phase::Analysis),
            career_suggestions: Some(next.suggestion_titles()),
            ..ProgressPatch::default()
        })
    }

    fn select_career(&self, next: &mut FlowState, title: &str) -> Result<ProgressPatch, FlowError> {
        if next.suggestions.is_empty() {
            return Err(FlowError::NoCareerSuggestions);
        }
        if !next.suggestions.iter().any(|s| s.title == title) {
            return Err(FlowError::UnknownCareer(title.to_string()));
        }

        next.selected_career = Some(title.to_string());
        next.story_index = 0;
        next.outcome = None;
        next.phase = Phase::Story;
        Ok(ProgressPatch {
            selected_career: Some(Some(title.to_string())),
            current_story_part: Some(0),
            current_step: Some(Phase::Story),
            ..ProgressPatch::default()
        })
    }

    fn choose(&self, next: &mut FlowState, choice_index: usize) -> Result<ProgressPatch, FlowError> {
        let narrative = self.content.narrative();
        let part = narrative
            .part(next.story_index)
            .ok_or(NarrativeError::IndexOutOfRange {
                index: next.story_index,
                len: narrative.len(),
            })?;
        let choice = part
            .choices
            .get(choice_index)
            .ok_or(FlowError::UnknownStoryChoice {
                index: choice_index,
                available: part.choices.len(),
            })?;

        let step = NarrativeResolver::advance(narrative, next.story_index, choice, &next.scores)?;
        next.scores = step.scores;

        if step.terminal {
            next.phase = Phase::Results;
            next.outcome = step.outcome;
            return Ok(ProgressPatch {
                scores: Some(next.scores.clone()),
                current_step: Some(Phase::Results),
                outcome: Some(step.outcome),
                ..ProgressPatch::default()
            });
        }

        next.story_index = step.index;
        Ok(ProgressPatch {
            scores: Some(next.scores.clone()),
            current_story_part: Some(step.index),
            ..ProgressPatch::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::narrative::NarrativeOutcome;
    use crate::domain::scoring::TraitScores;

    const QUESTIONS: &str = r#"
- prompt: How do you explain things?
  answers:
    - text: With enthusiasm
      score: { communication: 50, dataScience: 5 }
    - text: With numbers
      score: { analysis: 10 }
- prompt: How do you solve problems?
  answers:
    - text: Step by step
      score: { analysis: 40 }
    - text: I wait
"#;

    const NARRATIVES: &str = r#"
- key: office
  title: Office
  parts:
    - dimension: first
      title: First
      description: Something breaks.
      choices:
        - text: Careful
          score: { analysis: 4 }
        - text: Rush
          score: { analysis: -2 }
    - dimension: second
      title: Second
      description: Explain it.
      choices:
        - text: Explain
          score: { communication: 3, creativity: 5 }
"#;

    fn machine() -> FlowMachine {
        let catalog = ContentCatalog::from_yaml(QUESTIONS, NARRATIVES).unwrap();
        let content = FlowContent::from_catalog(&catalog, None).unwrap();
        FlowMachine::new(Arc::new(content))
    }

    fn at_quiz() -> FlowMachine {
        let mut m = machine();
        m.apply(FlowEvent::Start).unwrap();
        m.apply(FlowEvent::IdentitySubmitted(Identity::new("Deniz", 0))).unwrap();
        m.apply(FlowEvent::IdentitySubmitted(Identity::new("", 19))).unwrap();
        m.apply(FlowEvent::Continue).unwrap();
        m
    }

    fn at_analysis() -> FlowMachine {
        let mut m = at_quiz();
        m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap();
        m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap();
        m
    }

    #[test]
    fn walks_identity_steps_into_quiz() {
        let m = at_quiz();
        assert_eq!(m.state().phase(), Phase::Quiz);
        assert_eq!(m.state().identity(), &Identity::new("Deniz", 19));
        assert_eq!(m.state().question_index(), 0);
    }

    #[test]
    fn start_patch_records_step() {
        let mut m = machine();
        let transition = m.apply(FlowEvent::Start).unwrap();
        assert_eq!(transition.from, Phase::Intro);
        assert_eq!(transition.to, Phase::Name);
        assert_eq!(transition.patch, ProgressPatch::step(Phase::Name));
    }

    #[test]
    fn blank_name_is_rejected_without_state_change() {
        let mut m = machine();
        m.apply(FlowEvent::Start).unwrap();
        let before = m.state().clone();

        let err = m
            .apply(FlowEvent::IdentitySubmitted(Identity::new("  ", 0)))
            .unwrap_err();

        assert!(matches!(err, FlowError::InvalidIdentity(_)));
        assert_eq!(m.state(), &before);
    }

    #[test]
    fn unexpected_event_leaves_state_untouched() {
        let mut m = machine();
        let before = m.state().clone();

        let err = m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap_err();

        assert_eq!(err, FlowError::unexpected(Phase::Intro, "answer-selected"));
        assert_eq!(m.state(), &before);
    }

    #[test]
    fn answer_merges_delta_and_advances_question() {
        let mut m = at_quiz();
        let transition = m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap();

        assert_eq!(m.state().phase(), Phase::Quiz);
        assert_eq!(m.state().question_index(), 1);
        assert_eq!(m.state().scores().value("communication"), 50.0);
        assert_eq!(transition.patch.current_question, Some(1));
        assert!(transition.patch.current_step.is_none());
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let mut m = at_quiz();
        let err = m.apply(FlowEvent::AnswerSelected { answer_index: 9 }).unwrap_err();
        assert_eq!(err, FlowError::UnknownAnswer { index: 9, available: 2 });
        assert_eq!(m.state().scores(), &TraitScores::canonical());
    }

    #[test]
    fn last_answer_ranks_careers() {
        let mut m = at_quiz();
        m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap();
        let transition = m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap();

        assert_eq!(m.state().phase(), Phase::Analysis);
        assert_eq!(
            m.state().suggestion_titles(),
            vec!["Data Scientist", "Backend Developer", "Security Specialist"]
        );
        let pcts: Vec<u8> = m
            .state()
            .suggestions()
            .iter()
            .map(|s| s.match_percentage.value())
            .collect();
        assert_eq!(pcts, vec![46, 45, 45]);
        assert_eq!(
            transition.patch.career_suggestions,
            Some(m.state().suggestion_titles())
        );
        assert_eq!(transition.patch.current_step, Some(Phase::Analysis));
    }

    #[test]
    fn weak_answers_leave_no_career_to_select() {
        let mut m = at_quiz();
        m.apply(FlowEvent::AnswerSelected { answer_index: 0 }).unwrap();
        m.apply(FlowEvent::AnswerSelected { answer_index: 1 }).unwrap();

        assert_eq!(m.state().phase(), Phase::Analysis);
        assert!(m.state().suggestions().is_empty());
        assert!(!m.state().career_selection_available());
        assert_eq!(m.apply(FlowEvent::Continue).unwrap_err(), FlowError::NoCareerSuggestions);
        assert_eq!(
            m.apply(FlowEvent::CareerSelected {
                title: "Data Scientist".to_string()
            })
            .unwrap_err(),
            FlowError::NoCareerSuggestions
        );
    }

    #[test]
    fn career_must_be_among_suggestions() {
        let mut m = at_analysis();
        let err = m
            .apply(FlowEvent::CareerSelected {
                title: "Frontend Developer".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, FlowError::UnknownCareer("Frontend Developer".to_string()));
        assert_eq!(m.state().phase(), Phase::Analysis);
    }

    #[test]
    fn selecting_career_enters_story_at_first_part() {
        let mut m = at_analysis();
        m.apply(FlowEvent::Continue).unwrap();
        assert_eq!(m.state().phase(), Phase::CareerSelection);

        let transition = m
            .apply(FlowEvent::CareerSelected {
                title: "Backend Developer".to_string(),
            })
            .unwrap();

        assert_eq!(m.state().phase(), Phase::Story);
        assert_eq!(m.state().story_index(), 0);
        assert_eq!(m.state().selected_career(), Some("Backend Developer"));
        assert_eq!(
            transition.patch.selected_career,
            Some(Some("Backend Developer".to_string()))
        );
    }

    #[test]
    fn story_runs_to_results_with_outcome() {
        let mut m = at_analysis();
        m.apply(FlowEvent::CareerSelected {
            title: "Data Scientist".to_string(),
        })
        .unwrap();

        let first = m.apply(FlowEvent::StoryChoiceSelected { choice_index: 0 }).unwrap();
        assert_eq!(first.to, Phase::Story);
        assert_eq!(m.state().story_index(), 1);
        assert_eq!(m.state().scores().value("analysis"), 44.0);

        let last = m.apply(FlowEvent::StoryChoiceSelected { choice_index: 0 }).unwrap();
        assert_eq!(last.to, Phase::Results);
        assert_eq!(m.state().outcome(), Some(NarrativeOutcome::Passed));
        assert_eq!(last.patch.outcome, Some(Some(NarrativeOutcome::Passed)));
        // creativity is not tracked by this narrative
        assert_eq!(m.state().scores().value("creativity"), 0.0);
        assert_eq!(m.state().scores().value("communication"), 53.0);
    }

    #[test]
    fn unknown_story_choice_is_rejected() {
        let mut m = at_analysis();
        m.apply(FlowEvent::CareerSelected {
            title: "Data Scientist".to_string(),
        })
        .unwrap();
        let err = m.apply(FlowEvent::StoryChoiceSelected { choice_index: 5 }).unwrap_err();
        assert_eq!(err, FlowError::UnknownStoryChoice { index: 5, available: 2 });
        assert_eq!(m.state().story_index(), 0);
    }

    #[test]
    fn restart_resets_everything() {
        let mut m = at_analysis();
        assert_eq!(m.state().scores().get("dataScience"), Some(5.0));

        let transition = m.apply(FlowEvent::Restart).unwrap();

        assert_eq!(transition.to, Phase::Intro);
        assert_eq!(transition.patch, ProgressPatch::reset());
        assert_eq!(m.state(), &FlowState::fresh());
        assert!(!m.state().scores().contains("dataScience"));
        assert_eq!(m.state().scores().len(), 5);
    }

    #[test]
    fn restart_from_intro_is_accepted() {
        let mut m = machine();
        assert!(m.apply(FlowEvent::Restart).is_ok());
    }

    #[test]
    fn restore_recomputes_suggestions() {
        let mut m = machine();
        let record = ProgressRecord {
            scores: TraitScores::canonical()
                .with("communication", 50.0)
                .with("analysis", 40.0),
            current_step: Phase::CareerSelection,
            career_suggestions: vec!["Stale".to_string()],
            ..ProgressRecord::default()
        };

        m.restore(&record);

        assert_eq!(m.state().phase(), Phase::CareerSelection);
        assert_eq!(m.state().suggestions().len(), 3);
        assert_eq!(m.state().suggestions()[0].title, "Data Scientist");
    }

    #[test]
    fn restored_story_can_fail() {
        let mut m = machine();
        m.restore(&ProgressRecord {
            current_step: Phase::Story,
            selected_career: Some("Data Scientist".to_string()),
            ..ProgressRecord::default()
        });

        m.apply(FlowEvent::StoryChoiceSelected { choice_index: 1 }).unwrap();
        m.apply(FlowEvent::StoryChoiceSelected { choice_index: 0 }).unwrap();

        assert_eq!(m.state().phase(), Phase::Results);
        assert_eq!(m.state().outcome(), Some(NarrativeOutcome::Failed));
    }

    #[test]
    fn restore_clamps_indices_outside_content() {
        let mut m = machine();
        m.restore(&ProgressRecord {
            current_step: Phase::Story,
            current_story_part: 12,
            current_question: 40,
            ..ProgressRecord::default()
        });

        assert_eq!(m.state().story_index(), 0);
        assert_eq!(m.state().question_index(), 0);
    }

    #[test]
    fn restore_at_results_recomputes_missing_outcome() {
        let mut m = machine();
        m.restore(&ProgressRecord {
            current_step: Phase::Results,
            scores: TraitScores::canonical().with("analysis", 12.0),
            outcome: None,
            ..ProgressRecord::default()
        });
        assert_eq!(m.state().outcome(), Some(NarrativeOutcome::Passed));
    }

    #[test]
    fn selecting_unknown_narrative_fails() {
        let catalog = ContentCatalog::from_yaml(QUESTIONS, NARRATIVES).unwrap();
        assert!(matches!(
            FlowContent::from_catalog(&catalog, Some("missing")),
            Err(ContentError::UnknownNarrative(_))
        ));
    }
}
