use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STRICT_MODE: bool = true;
pub const DEFAULT_DIVERGENCE_CAP: f64 = 0.10;
pub const DEFAULT_RECOVERY_THRESHOLD: f64 = 0.95;

/// Thresholds applied by the orchestrator after classification and planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GatingConfig {
    /// Escalate accumulated warnings to a `Warn` verdict.
    #[serde(default = "default_strict_mode")]
    pub strict_mode: bool,
    /// Plans whose divergence estimate exceeds this are blocked.
    #[serde(default = "default_divergence_cap")]
    pub divergence_cap: f64,
    /// Plans whose recovery-rate estimate falls below this are blocked.
    #[serde(default = "default_recovery_threshold")]
    pub recovery_threshold: f64,
}

fn default_strict_mode() -> bool {
    DEFAULT_STRICT_MODE
}

fn default_divergence_cap() -> f64 {
    DEFAULT_DIVERGENCE_CAP
}

fn default_recovery_threshold() -> f64 {
    DEFAULT_RECOVERY_THRESHOLD
}

impl Default for GatingConfig {
    fn default() -> Self {
        Self {
            strict_mode: DEFAULT_STRICT_MODE,
            divergence_cap: DEFAULT_DIVERGENCE_CAP,
            recovery_threshold: DEFAULT_RECOVERY_THRESHOLD,
        }
    }
}

fn validate_unit_interval(label: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Validation(format!(
            "gating.{label} must be a finite number"
        )));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "gating.{label} must be in [0.0, 1.0], got {value}"
        )));
    }
    Ok(())
}

impl GatingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_unit_interval("divergence_cap", self.divergence_cap)?;
        validate_unit_interval("recovery_threshold", self.recovery_threshold)?;
        Ok(())
    }
}
