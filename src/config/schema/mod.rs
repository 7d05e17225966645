mod audit;
mod core;
mod gating;
mod observability;
mod patterns;

pub use audit::AuditConfig;
pub use core::Config;
#[cfg(test)]
pub(crate) use core::test_env;
pub use gating::{
    DEFAULT_DIVERGENCE_CAP, DEFAULT_RECOVERY_THRESHOLD, DEFAULT_STRICT_MODE, GatingConfig,
};
pub use observability::ObservabilityConfig;
pub use patterns::{DEFAULT_HIGH_RISK_KEYWORDS, PatternSpec, PatternsConfig};
