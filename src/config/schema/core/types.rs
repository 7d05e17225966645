use super::super::{AuditConfig, GatingConfig, ObservabilityConfig, PatternsConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was loaded from (or will be saved to) - not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gating: GatingConfig,

    #[serde(default)]
    pub patterns: PatternsConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gating.validate()?;
        for spec in self
            .patterns
            .extra_unsafe
            .iter()
            .chain(&self.patterns.extra_warn)
            .chain(&self.patterns.extra_safe)
        {
            if spec.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "patterns: every rule needs a non-empty id".into(),
                ));
            }
        }
        if self
            .patterns
            .high_risk_keywords
            .iter()
            .any(|keyword| keyword.is_empty())
        {
            return Err(ConfigError::Validation(
                "patterns.high_risk_keywords must not contain empty strings".into(),
            ));
        }
        Ok(())
    }
}
