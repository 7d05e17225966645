//! Heuristic risk estimates.
//!
//! These are step-count placeholders, not measured risk. The arithmetic is
//! fixed because gating decisions and stored test vectors depend on it.

pub const BASE_DIVERGENCE: f64 = 0.02;
pub const DIVERGENCE_PER_STEP: f64 = 0.01;
pub const RISK_KEYWORD_BONUS: f64 = 0.02;
pub const MAX_DIVERGENCE: f64 = 0.20;

pub const BASE_RECOVERY_RATE: f64 = 0.98;
pub const RECOVERY_PENALTY_PER_STEP: f64 = 0.005;
pub const MIN_RECOVERY_RATE: f64 = 0.90;

fn step_factor(step_count: usize) -> f64 {
    f64::from(u32::try_from(step_count).unwrap_or(u32::MAX))
}

/// `min(0.02 + 0.01 * steps + 0.02 * keywords_present, 0.20)`
pub fn estimate_divergence(
    intent_label: &str,
    step_count: usize,
    high_risk_keywords: &[String],
) -> f64 {
    let keyword_hits = high_risk_keywords
        .iter()
        .filter(|keyword| intent_label.contains(keyword.as_str()))
        .count();
    let risk_bonus = RISK_KEYWORD_BONUS * step_factor(keyword_hits);
    (BASE_DIVERGENCE + DIVERGENCE_PER_STEP * step_factor(step_count) + risk_bonus)
        .min(MAX_DIVERGENCE)
}

/// `max(0.98 - 0.005 * steps, 0.90)`
pub fn estimate_recovery_rate(step_count: usize) -> f64 {
    (BASE_RECOVERY_RATE - RECOVERY_PENALTY_PER_STEP * step_factor(step_count))
        .max(MIN_RECOVERY_RATE)
}
