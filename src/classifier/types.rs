use serde::{Deserialize, Serialize};

/// Safety verdict attached to every classified command.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SafetyVerdict {
    #[default]
    Pass,
    Warn,
    Fail,
}

impl SafetyVerdict {
    /// `Fail` is the only verdict that blocks a command outright.
    pub fn is_blocking(self) -> bool {
        match self {
            Self::Fail => true,
            Self::Pass | Self::Warn => false,
        }
    }
}

/// Structured classification of a raw command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub raw_intent_label: String,
    pub safety_verdict: SafetyVerdict,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f64,
    pub warnings: Vec<String>,
    pub matched_pattern_id: Option<String>,
}

impl Intent {
    pub fn label(&self) -> &str {
        &self.raw_intent_label
    }

    pub fn is_blocked(&self) -> bool {
        self.safety_verdict.is_blocking()
    }
}
