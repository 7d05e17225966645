//! Deterministic intent classifier.
//!
//! Maps a raw command string to an [`Intent`]: a label, a safety verdict and a
//! confidence score. Evaluation runs in a fixed order:
//!
//! 1. unsafe patterns (short-circuit to `Fail`, never downgraded)
//! 2. warn patterns (all evaluated, warnings accumulate)
//! 3. safe prefixes (first match raises confidence)
//! 4. verdict: `Warn` only when warnings exist and strict mode is on
//! 5. label extraction from the leading token

mod labels;
mod rules;
mod types;

pub use labels::{
    EMPTY_COMMAND_LABEL, EXECUTE_LABEL_PREFIX, LABEL_RULES, LabelRule, TokenMatcher,
    extract_label, label_for_token,
};
pub use rules::{
    BuiltinPattern, PatternRule, RuleSet, SAFE_PATTERNS, UNSAFE_PATTERNS, WARN_PATTERNS,
};
pub use types::{Intent, SafetyVerdict};

use crate::config::PatternsConfig;
use crate::error::RuleError;

pub const BASELINE_CONFIDENCE: f64 = 0.85;
pub const SAFE_CONFIDENCE: f64 = 0.95;
pub const UNSAFE_CONFIDENCE: f64 = 0.99;

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    strict_mode: bool,
    unsafe_rules: RuleSet,
    warn_rules: RuleSet,
    safe_rules: RuleSet,
}

impl IntentClassifier {
    pub fn new(strict_mode: bool, patterns: &PatternsConfig) -> Result<Self, RuleError> {
        Ok(Self {
            strict_mode,
            unsafe_rules: RuleSet::compile(UNSAFE_PATTERNS, &patterns.extra_unsafe)?,
            warn_rules: RuleSet::compile(WARN_PATTERNS, &patterns.extra_warn)?,
            safe_rules: RuleSet::compile(SAFE_PATTERNS, &patterns.extra_safe)?,
        })
    }

    /// Classifier with only the built-in tables.
    pub fn builtin(strict_mode: bool) -> Result<Self, RuleError> {
        Self::new(strict_mode, &PatternsConfig::default())
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Classify a command. Total over all inputs; never fails.
    pub fn classify(&self, command: &str) -> Intent {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Intent {
                raw_intent_label: EMPTY_COMMAND_LABEL.to_string(),
                safety_verdict: SafetyVerdict::Pass,
                confidence: BASELINE_CONFIDENCE,
                warnings: Vec::new(),
                matched_pattern_id: None,
            };
        }

        let label = extract_label(trimmed);

        if let Some(rule) = self.unsafe_rules.first_match(trimmed) {
            return Intent {
                raw_intent_label: label,
                safety_verdict: SafetyVerdict::Fail,
                confidence: UNSAFE_CONFIDENCE,
                warnings: vec![format!("Unsafe pattern detected: {}", rule.message())],
                matched_pattern_id: Some(rule.id().to_string()),
            };
        }

        let warnings: Vec<String> = self
            .warn_rules
            .matches(trimmed)
            .map(|rule| rule.message().to_string())
            .collect();

        let confidence = if self.safe_rules.first_match(trimmed).is_some() {
            SAFE_CONFIDENCE
        } else {
            BASELINE_CONFIDENCE
        };

        let safety_verdict = if self.strict_mode && !warnings.is_empty() {
            SafetyVerdict::Warn
        } else {
            SafetyVerdict::Pass
        };

        Intent {
            raw_intent_label: label,
            safety_verdict,
            confidence,
            warnings,
            matched_pattern_id: None,
        }
    }
}
