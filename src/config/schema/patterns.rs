use serde::{Deserialize, Serialize};

/// Intent-label substrings that add to a plan's divergence estimate.
pub const DEFAULT_HIGH_RISK_KEYWORDS: &[&str] = &["modification", "management", "execute_"];

/// A user-supplied classifier rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub id: String,
    /// Case-insensitive regex.
    pub pattern: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternsConfig {
    #[serde(default)]
    pub extra_unsafe: Vec<PatternSpec>,
    #[serde(default)]
    pub extra_warn: Vec<PatternSpec>,
    #[serde(default)]
    pub extra_safe: Vec<PatternSpec>,
    #[serde(default = "default_high_risk_keywords")]
    pub high_risk_keywords: Vec<String>,
}

fn default_high_risk_keywords() -> Vec<String> {
    DEFAULT_HIGH_RISK_KEYWORDS
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            extra_unsafe: Vec::new(),
            extra_warn: Vec::new(),
            extra_safe: Vec::new(),
            high_risk_keywords: default_high_risk_keywords(),
        }
    }
}
