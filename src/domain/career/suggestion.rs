//! CareerSuggestion - one ranked career match.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CareerArchetype;

/// Match percentage, always within `[MatchPercentage::MIN, MatchPercentage::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchPercentage(u8);

impl MatchPercentage {
    /// Lowest percentage ever shown.
    pub const MIN: u8 = 45;

    /// Highest percentage ever shown.
    pub const MAX: u8 = 95;

    /// Rounds a raw score and clamps it into range.
    pub fn from_raw(raw: f64) -> Self {
        let rounded = raw.round().clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        Self(rounded as u8)
    }

    /// Lowers the percentage by `amount`, never below the minimum.
    pub fn lowered_by(self, amount: u8) -> Self {
        Self(self.0.saturating_sub(amount).max(Self::MIN))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for MatchPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A ranked career suggestion. Built once by the ranker, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub archetype: CareerArchetype,
    pub title: String,
    pub description: String,
    pub match_percentage: MatchPercentage,
    pub required_skills: Vec<String>,
    pub growth_areas: Vec<String>,
}

impl CareerSuggestion {
    /// Creates a suggestion from the archetype's static profile.
    pub fn new(archetype: CareerArchetype, match_percentage: MatchPercentage) -> Self {
        let profile = archetype.profile();
        Self {
            archetype,
            title: profile.title.to_string(),
            description: profile.description.to_string(),
            match_percentage,
            required_skills: profile.required_skills.iter().map(|s| s.to_string()).collect(),
            growth_areas: profile.growth_areas.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_clamps_low_values_up() {
        assert_eq!(MatchPercentage::from_raw(31.2).value(), 45);
    }

    #[test]
    fn from_raw_clamps_high_values_down() {
        assert_eq!(MatchPercentage::from_raw(140.0).value(), 95);
    }

    #[test]
    fn from_raw_rounds_to_nearest() {
        assert_eq!(MatchPercentage::from_raw(62.5).value(), 63);
        assert_eq!(MatchPercentage::from_raw(62.4).value(), 62);
    }

    #[test]
    fn lowered_by_stops_at_minimum() {
        let pct = MatchPercentage::from_raw(70.0);
        assert_eq!(pct.lowered_by(15).value(), 55);
        assert_eq!(pct.lowered_by(30).value(), 45);
    }

    #[test]
    fn suggestion_copies_profile_content() {
        let suggestion =
            CareerSuggestion::new(CareerArchetype::Data, MatchPercentage::from_raw(80.0));
        assert_eq!(suggestion.title, "Data Scientist");
        assert!(suggestion.required_skills.contains(&"SQL".to_string()));
        assert_eq!(suggestion.match_percentage.to_string(), "80%");
    }
}
