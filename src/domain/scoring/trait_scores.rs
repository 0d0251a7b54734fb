//! TraitScores - open, insertion-ordered trait accumulator.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Trait names every fresh or restarted session starts with.
pub const CANONICAL_TRAITS: [&str; 5] = [
    "communication",
    "analysis",
    "teamwork",
    "creativity",
    "technical",
];

/// Mapping from trait name to accumulated score.
///
/// The key set is open: answers may introduce ad-hoc traits such as
/// `dataScience` which then accumulate alongside the canonical five.
///
/// # Invariants
///
/// - Keys keep their first-insertion order
/// - A key, once present, is never removed (only a restart replaces the
///   whole value with [`TraitScores::canonical`])
/// - Each key appears at most once
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraitScores {
    entries: Vec<(String, f64)>,
}

impl TraitScores {
    /// Creates an empty score set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the five canonical traits, all at zero.
    pub fn canonical() -> Self {
        CANONICAL_TRAITS.iter().map(|name| (*name, 0.0)).collect()
    }

    /// Builder-style insert, summing into an existing key.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.add(name, value);
        self
    }

    /// Returns the score for a trait if the key exists.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    /// Returns the score for a trait, treating a missing key as zero.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    /// Returns true if the trait key exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of trait keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no trait key exists.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, score)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Iterates over trait names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Returns a copy holding only the listed trait keys.
    pub fn restricted_to<S: AsRef<str>>(&self, names: &[S]) -> TraitScores {
        let entries = self
            .entries
            .iter()
            .filter(|(key, _)| names.iter().any(|name| name.as_ref() == key))
            .cloned()
            .collect();
        Self { entries }
    }

    /// Adds `amount` to a trait, creating it at `amount` if absent.
    pub(crate) fn add(&mut self, name: impl Into<String>, amount: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, value)) => *value += amount,
            None => self.entries.push((name, amount)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for TraitScores {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut scores = TraitScores::new();
        for (name, value) in iter {
            scores.add(name, value);
        }
        scores
    }
}

impl Serialize for TraitScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TraitScoresVisitor;

impl<'de> Visitor<'de> for TraitScoresVisitor {
    type Value = TraitScores;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of trait names to numeric scores")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut scores = TraitScores::new();
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            scores.add(key, value);
        }
        Ok(scores)
    }
}

impl<'de> Deserialize<'de> for TraitScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TraitScoresVisitor)
    }
}
