//! Career Compass - Interactive career self-assessment engine
//!
//! A user answers a short personality quiz, receives ranked career
//! suggestions, picks one, and walks a branching story whose choices
//! decide a pass/fail outcome. Progress is saved per user so an
//! interrupted session can resume.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
