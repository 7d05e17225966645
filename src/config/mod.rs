pub mod schema;

pub use schema::{
    AuditConfig, Config, DEFAULT_DIVERGENCE_CAP, DEFAULT_HIGH_RISK_KEYWORDS,
    DEFAULT_RECOVERY_THRESHOLD, DEFAULT_STRICT_MODE, GatingConfig, ObservabilityConfig,
    PatternSpec, PatternsConfig,
};
#[cfg(test)]
pub(crate) use schema::test_env;
