//! Execution planner: expands an accepted intent into five abstract steps,
//! three rollback checkpoints and two risk estimates.

mod estimate;
mod types;

pub use estimate::{
    BASE_DIVERGENCE, BASE_RECOVERY_RATE, DIVERGENCE_PER_STEP, MAX_DIVERGENCE, MIN_RECOVERY_RATE,
    RECOVERY_PENALTY_PER_STEP, RISK_KEYWORD_BONUS, estimate_divergence, estimate_recovery_rate,
};
pub use types::{CHECKPOINT_ID_PREFIX, Checkpoint, CheckpointCounter, ExecutionPlan, Phase};

use crate::config::DEFAULT_HIGH_RISK_KEYWORDS;
use chrono::Utc;
use std::collections::BTreeMap;

pub const STEP_COUNT: usize = 5;

fn build_steps(intent: &str, context: &str) -> [String; STEP_COUNT] {
    [
        format!("Verify {context} is accessible for {intent}"),
        format!("Initialize {intent} execution environment"),
        format!("Execute {intent} with monitoring"),
        format!("Validate {intent} results against {context}"),
        format!("Update state after {intent}"),
    ]
}

#[derive(Debug, Clone)]
pub struct ExecutionPlanner {
    high_risk_keywords: Vec<String>,
}

impl Default for ExecutionPlanner {
    fn default() -> Self {
        Self::new(
            DEFAULT_HIGH_RISK_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl ExecutionPlanner {
    pub fn new(high_risk_keywords: Vec<String>) -> Self {
        Self { high_risk_keywords }
    }

    pub fn high_risk_keywords(&self) -> &[String] {
        &self.high_risk_keywords
    }

    /// Build a plan. The only state touched is `counter`, which supplies the
    /// three checkpoint ids in pre/mid/post order.
    pub fn plan(
        &self,
        counter: &mut CheckpointCounter,
        intent_label: &str,
        context: &str,
        divergence_cap: f64,
    ) -> ExecutionPlan {
        let steps = build_steps(intent_label, context).to_vec();

        let checkpoints = Phase::ALL
            .iter()
            .map(|&phase| build_checkpoint(counter, intent_label, context, phase))
            .collect();

        let divergence_estimate =
            estimate_divergence(intent_label, steps.len(), &self.high_risk_keywords);
        let recovery_rate_estimate = estimate_recovery_rate(steps.len());

        let blocked = divergence_estimate > divergence_cap;
        let block_reason = blocked.then(|| {
            format!(
                "Divergence estimate {:.2}% exceeds cap {:.2}%",
                divergence_estimate * 100.0,
                divergence_cap * 100.0
            )
        });

        tracing::debug!(
            intent = intent_label,
            divergence = divergence_estimate,
            recovery = recovery_rate_estimate,
            blocked,
            "plan built"
        );

        ExecutionPlan {
            intent_label: intent_label.to_string(),
            context: context.to_string(),
            steps,
            checkpoints,
            divergence_estimate,
            recovery_rate_estimate,
            blocked,
            block_reason,
        }
    }
}

fn build_checkpoint(
    counter: &mut CheckpointCounter,
    intent_label: &str,
    context: &str,
    phase: Phase,
) -> Checkpoint {
    let mut state_snapshot = BTreeMap::new();
    state_snapshot.insert("context".to_string(), serde_json::json!(context));
    state_snapshot.insert("phase".to_string(), serde_json::json!(phase.to_string()));

    Checkpoint {
        id: counter.next_id(),
        created_at: Utc::now(),
        intent_label: intent_label.to_string(),
        phase,
        state_snapshot,
        reversible: true,
        legacy_command: None,
    }
}
