use crate::classifier::Intent;
use crate::planner::ExecutionPlan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate that rejected a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum BlockReason {
    /// Classifier returned `Fail`.
    UnsafeCommand {
        pattern_id: Option<String>,
        detail: String,
    },
    /// Planner divergence estimate above the configured cap.
    DivergenceExceeded { estimate: f64, cap: f64 },
    /// Planner recovery-rate estimate below the configured threshold.
    RecoveryBelowThreshold { estimate: f64, threshold: f64 },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafeCommand { detail, .. } if !detail.is_empty() => f.write_str(detail),
            Self::UnsafeCommand { .. } => f.write_str("Unsafe command detected"),
            Self::DivergenceExceeded { estimate, cap } => write!(
                f,
                "Divergence estimate {:.2}% exceeds cap {:.2}%",
                estimate * 100.0,
                cap * 100.0
            ),
            Self::RecoveryBelowThreshold {
                estimate,
                threshold,
            } => write!(
                f,
                "Recovery rate estimate {:.2}% below threshold {:.2}%",
                estimate * 100.0,
                threshold * 100.0
            ),
        }
    }
}

/// A rejected submission. Carries the plan when the rejection came from a
/// planning gate, so callers can see what would have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedResult {
    pub command: String,
    pub intent: Intent,
    pub reason: BlockReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<ExecutionPlan>,
}

/// Result of [`super::Orchestrator::submit`]. Rejection is a normal outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Approved(ExecutionPlan),
    Blocked(BlockedResult),
}

impl SubmitOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }

    pub fn approved_plan(&self) -> Option<&ExecutionPlan> {
        match self {
            Self::Approved(plan) => Some(plan),
            Self::Blocked(_) => None,
        }
    }

    pub fn blocked(&self) -> Option<&BlockedResult> {
        match self {
            Self::Approved(_) => None,
            Self::Blocked(result) => Some(result),
        }
    }
}

/// Aggregate counters projected from the history log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorMetrics {
    pub total_commands: u64,
    pub blocked_commands: u64,
    pub block_rate: f64,
    pub divergence_cap: f64,
    pub recovery_threshold: f64,
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn block_rate(blocked: u64, total: u64) -> f64 {
    blocked as f64 / total.max(1) as f64
}
