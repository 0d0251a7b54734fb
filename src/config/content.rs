//! Content selection configuration

use serde::Deserialize;

use super::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Narrative key to run after career selection; unset uses the catalog default
    #[serde(default)]
    pub narrative: Option<String>,
}

impl ContentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.narrative {
            Some(key) if key.trim().is_empty() => Err(ValidationError::BlankNarrativeKey),
            _ => Ok(()),
        }
    }
}
