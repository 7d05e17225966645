use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CHECKPOINT_ID_PREFIX: &str = "ckpt-";

/// Plan phase a checkpoint guards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Pre,
    Mid,
    Post,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Pre, Phase::Mid, Phase::Post];
}

/// Immutable rollback target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Empty on records written before checkpoints carried an intent.
    #[serde(default)]
    pub intent_label: String,
    pub phase: Phase,
    pub state_snapshot: BTreeMap<String, serde_json::Value>,
    pub reversible: bool,
    /// Identifier carried by legacy checkpoints in place of `intent_label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_command: Option<String>,
}

impl Checkpoint {
    /// Numeric part of the id, when it follows the `ckpt-NNNN` format.
    pub fn sequence(&self) -> Option<u64> {
        self.id
            .strip_prefix(CHECKPOINT_ID_PREFIX)
            .and_then(|digits| digits.parse().ok())
    }
}

/// Source of gap-free, strictly increasing checkpoint ids.
///
/// Owned by exactly one orchestrator; never shared between tenants.
#[derive(Debug, Default)]
pub struct CheckpointCounter {
    issued: u64,
}

impl CheckpointCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{CHECKPOINT_ID_PREFIX}{:04}", self.issued)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// Staged plan for one accepted classification. Built in full even when
/// blocked, so auditors can see what would have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub intent_label: String,
    pub context: String,
    pub steps: Vec<String>,
    /// Always exactly three: pre, mid, post.
    pub checkpoints: Vec<Checkpoint>,
    pub divergence_estimate: f64,
    pub recovery_rate_estimate: f64,
    pub blocked: bool,
    pub block_reason: Option<String>,
}

impl ExecutionPlan {
    pub fn checkpoint(&self, phase: Phase) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.phase == phase)
    }
}
