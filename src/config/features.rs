//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Load stored progress when a session starts
    #[serde(default = "default_true")]
    pub enable_resume: bool,

    /// Save each transition's changed fields
    #[serde(default = "default_true")]
    pub persist_progress: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_resume: true,
            persist_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.enable_resume);
        assert!(flags.persist_progress);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{ "enable_resume": false }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(!flags.enable_resume);
        assert!(flags.persist_progress);
    }
}
