//! Career Ranker - converts trait scores into ranked career suggestions.

use tracing::debug;

use super::{CareerArchetype, CareerSuggestion, MatchPercentage};
use crate::domain::scoring::TraitScores;

/// Raw archetype score an archetype must exceed to be suggested.
pub const INCLUSION_THRESHOLD: f64 = 30.0;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Percentage points subtracted per rank position after sorting.
pub const RANK_GAP: u8 = 15;

/// Multiplier applied to the weighted average.
const RAW_SCORE_MULTIPLIER: f64 = 2.0;

/// Career ranking functions.
pub struct CareerRanker;

impl CareerRanker {
    /// Computes the raw score of one archetype.
    ///
    /// # Algorithm
    /// raw = 2 × Σ(score[t] · w[t]) / Σ(w[t]), over the weighted traits `t`
    /// that are present in `scores`.
    ///
    /// # Edge Cases
    /// - No weighted trait present: returns `None` (archetype excluded)
    pub fn raw_score(archetype: CareerArchetype, scores: &TraitScores) -> Option<f64> {
        let (weighted_sum, total_weight) = archetype
            .weights()
            .iter()
            .filter_map(|(name, weight)| scores.get(name).map(|value| (value * weight, *weight)))
            .fold((0.0, 0.0), |(sum, total), (part, weight)| (sum + part, total + weight));

        if total_weight == 0.0 {
            return None;
        }

        Some(weighted_sum / total_weight * RAW_SCORE_MULTIPLIER)
    }

    /// Ranks the archetypes against the accumulated scores.
    ///
    /// # Algorithm
    /// 1. Keep archetypes whose raw score exceeds [`INCLUSION_THRESHOLD`]
    /// 2. Round and clamp each raw score into [45, 95]
    /// 3. Stable-sort descending (ties keep declaration order), take the top 3
    /// 4. Lower the entry at rank N by `15 · N`, never below 45
    ///
    /// # Edge Cases
    /// - Nothing clears the threshold: returns an empty Vec
    pub fn rank(scores: &TraitScores) -> Vec<CareerSuggestion> {
        let mut included: Vec<(CareerArchetype, MatchPercentage)> = CareerArchetype::ALL
            .iter()
            .filter_map(|archetype| {
                let raw = Self::raw_score(*archetype, scores)?;
                debug!(archetype = ?archetype, raw, "Computed raw archetype score");
                (raw > INCLUSION_THRESHOLD).then(|| (*archetype, MatchPercentage::from_raw(raw)))
            })
            .collect();

        // Vec::sort_by is stable.
        included.sort_by(|a, b| b.1.cmp(&a.1));

        included
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .enumerate()
            .map(|(rank, (archetype, pct))| {
                CareerSuggestion::new(archetype, pct.lowered_by(RANK_GAP.saturating_mul(rank as u8)))
            })
            .collect()
    }
}
