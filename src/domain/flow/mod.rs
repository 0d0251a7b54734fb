//! Flow module - the assessment state machine.
//!
//! # Components
//!
//! - `Phase` - the nine steps of the flow
//! - `FlowEvent` - user actions
//! - `FlowState` - in-memory state, mutated only by the machine
//! - `FlowMachine` - transitions, restore from stored progress
//! - `FlowView` - read-only projection for rendering
//!
//! Persistence is not performed here: each `Transition` carries a
//! `ProgressPatch` the application layer hands to a store.

mod errors;
mod event;
mod machine;
mod phase;
mod state;
mod view;

pub use errors::FlowError;
pub use event::{FlowEvent, Identity};
pub use machine::{FlowContent, FlowMachine, Transition};
pub use phase::Phase;
pub use state::FlowState;
pub use view::{
    AnalysisSummary, ChoiceView, FlowView, QuestionView, ResultView, StoryView, TraitAssessment,
    TraitLevel, AVERAGE_LEVEL_THRESHOLD, HIGH_LEVEL_THRESHOLD,
};
