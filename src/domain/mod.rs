//! Domain layer containing the assessment rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, errors, timestamps, state machine trait)
//! - `scoring` - Trait score accumulation
//! - `career` - Career archetypes and ranking
//! - `narrative` - Story graphs and outcome resolution
//! - `content` - Built-in question and story tables
//! - `flow` - The assessment state machine and its views
//! - `progress` - Persisted progress records and patches

pub mod career;
pub mod content;
pub mod flow;
pub mod foundation;
pub mod narrative;
pub mod progress;
pub mod scoring;
