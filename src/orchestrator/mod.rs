//! Orchestrator facade.
//!
//! Runs one command through classify, record, plan and gate, returning either
//! an approved [`ExecutionPlan`] or a [`BlockedResult`]. Nothing is executed.
//!
//! The checkpoint counter and history log are the only shared mutable state.
//! Both live behind one mutex so checkpoint ids stay gap-free and history
//! keeps submission order under concurrent callers.

mod audit;
mod history;
mod outcome;

pub use audit::{JsonlAuditSink, read_audit_log};
pub use history::{HistoryEntry, HistoryLog, HistoryRecord};
pub use outcome::{BlockReason, BlockedResult, OrchestratorMetrics, SubmitOutcome};

use crate::checkpoint::{CheckpointStore, RollbackOutcome};
use crate::classifier::{Intent, IntentClassifier};
use crate::config::{Config, GatingConfig};
use crate::error::Result;
use crate::observability::{Observer, ObserverEvent, create_observer};
use crate::planner::{Checkpoint, CheckpointCounter, ExecutionPlan, ExecutionPlanner};
use chrono::Utc;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    counter: CheckpointCounter,
    history: HistoryLog,
    audit: Option<JsonlAuditSink>,
}

impl State {
    fn record(&mut self, instance_id: Uuid, record: HistoryRecord) {
        if let Some(sink) = self.audit.as_mut()
            && let Err(error) = sink.append(&record)
        {
            tracing::warn!(
                instance = %instance_id,
                path = %sink.path().display(),
                error = %error,
                "failed to write audit record"
            );
        }
        self.history.push(record);
    }
}

pub struct Orchestrator {
    instance_id: Uuid,
    gating: GatingConfig,
    classifier: IntentClassifier,
    planner: ExecutionPlanner,
    checkpoints: CheckpointStore,
    observer: Box<dyn Observer>,
    state: Mutex<State>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("instance_id", &self.instance_id)
            .field("gating", &self.gating)
            .field("observer", &self.observer.name())
            .field("checkpoints", &self.checkpoints)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Build an orchestrator. Out-of-range thresholds, invalid patterns and an
    /// unopenable audit log fail here, never at submission time.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let classifier = IntentClassifier::new(config.gating.strict_mode, &config.patterns)?;
        let planner = ExecutionPlanner::new(config.patterns.high_risk_keywords.clone());
        let audit = config
            .audit
            .resolved_log_path()
            .map(|path| JsonlAuditSink::open(&path))
            .transpose()?;

        let instance_id = Uuid::new_v4();
        tracing::info!(
            instance = %instance_id,
            strict = config.gating.strict_mode,
            divergence_cap = config.gating.divergence_cap,
            recovery_threshold = config.gating.recovery_threshold,
            audit = audit.is_some(),
            "orchestrator ready"
        );

        Ok(Self {
            instance_id,
            gating: config.gating,
            classifier,
            planner,
            checkpoints: CheckpointStore::new(),
            observer: create_observer(&config.observability),
            state: Mutex::new(State {
                audit,
                ..State::default()
            }),
        })
    }

    /// Replace the observer built from config.
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Classify, plan and gate one command.
    pub fn submit(&self, command: &str) -> SubmitOutcome {
        let intent = self.classifier.classify(command);
        self.observer.record_event(&ObserverEvent::CommandClassified {
            command: command.to_string(),
            intent_label: intent.raw_intent_label.clone(),
            verdict: intent.safety_verdict,
            confidence: intent.confidence,
        });

        let outcome = {
            let mut state = self.lock_state();
            state.record(
                self.instance_id,
                HistoryRecord::Submission(HistoryEntry::new(command, &intent)),
            );

            if intent.is_blocked() {
                let reason = BlockReason::UnsafeCommand {
                    pattern_id: intent.matched_pattern_id.clone(),
                    detail: intent.warnings.first().cloned().unwrap_or_default(),
                };
                blocked(command, intent, reason, None)
            } else {
                let plan = self.planner.plan(
                    &mut state.counter,
                    intent.label(),
                    command.trim(),
                    self.gating.divergence_cap,
                );
                match self.gate(&plan) {
                    Some(reason) => {
                        state.record(
                            self.instance_id,
                            HistoryRecord::GateBlocked {
                                timestamp: Utc::now(),
                                command: command.to_string(),
                                intent_label: intent.raw_intent_label.clone(),
                                reason: reason.clone(),
                            },
                        );
                        blocked(command, intent, reason, Some(plan))
                    }
                    None => SubmitOutcome::Approved(plan),
                }
            }
        };

        let planned = match &outcome {
            SubmitOutcome::Approved(plan) => Some(plan),
            SubmitOutcome::Blocked(result) => result.plan.as_ref(),
        };
        if let Some(plan) = planned {
            self.checkpoints.retain(&plan.checkpoints);
        }

        match &outcome {
            SubmitOutcome::Approved(plan) => {
                tracing::info!(
                    instance = %self.instance_id,
                    intent = %plan.intent_label,
                    divergence = plan.divergence_estimate,
                    recovery = plan.recovery_rate_estimate,
                    "plan approved"
                );
                self.observer.record_event(&ObserverEvent::PlanApproved {
                    intent_label: plan.intent_label.clone(),
                    divergence_estimate: plan.divergence_estimate,
                    recovery_rate_estimate: plan.recovery_rate_estimate,
                });
            }
            SubmitOutcome::Blocked(result) => {
                tracing::info!(
                    instance = %self.instance_id,
                    intent = %result.intent.raw_intent_label,
                    reason = %result.reason,
                    "command blocked"
                );
                self.observer.record_event(&ObserverEvent::CommandBlocked {
                    command: result.command.clone(),
                    intent_label: result.intent.raw_intent_label.clone(),
                    reason: result.reason.to_string(),
                });
            }
        }

        outcome
    }

    fn gate(&self, plan: &ExecutionPlan) -> Option<BlockReason> {
        if plan.blocked {
            return Some(BlockReason::DivergenceExceeded {
                estimate: plan.divergence_estimate,
                cap: self.gating.divergence_cap,
            });
        }
        if plan.recovery_rate_estimate < self.gating.recovery_threshold {
            return Some(BlockReason::RecoveryBelowThreshold {
                estimate: plan.recovery_rate_estimate,
                threshold: self.gating.recovery_threshold,
            });
        }
        None
    }

    /// Register the rollback handler for an intent. Last registration wins.
    pub fn register_rollback_handler<F>(&self, intent_label: impl Into<String>, handler: F)
    where
        F: Fn(&Checkpoint) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.checkpoints
            .register(intent_label, Arc::new(handler));
    }

    pub fn checkpoint_store(&self) -> &CheckpointStore {
        &self.checkpoints
    }

    /// Roll back to `checkpoint`.
    ///
    /// Irreversible checkpoints fail without touching the audit trail or the
    /// observer. Every other attempt is recorded.
    pub fn rollback(&self, checkpoint: &Checkpoint) -> bool {
        if !checkpoint.reversible {
            tracing::debug!(
                instance = %self.instance_id,
                checkpoint = %checkpoint.id,
                "checkpoint is irreversible"
            );
            return false;
        }

        let outcome = self.checkpoints.rollback(checkpoint);
        let success = outcome.succeeded();

        self.lock_state().record(
            self.instance_id,
            HistoryRecord::Rollback {
                timestamp: Utc::now(),
                checkpoint_id: checkpoint.id.clone(),
                outcome: outcome.clone(),
            },
        );

        if let RollbackOutcome::Untracked { intent } = &outcome {
            tracing::warn!(
                instance = %self.instance_id,
                checkpoint = %checkpoint.id,
                intent = %intent,
                "untracked rollback recorded as success"
            );
        }
        self.observer.record_event(&ObserverEvent::RollbackAttempted {
            checkpoint_id: checkpoint.id.clone(),
            intent_label: outcome.intent().map(str::to_string),
            success,
        });

        success
    }

    /// Roll back to a retained checkpoint, by id.
    pub fn rollback_to(&self, checkpoint_id: &str) -> bool {
        match self.checkpoints.get(checkpoint_id) {
            Some(checkpoint) => self.rollback(&checkpoint),
            None => {
                tracing::warn!(
                    instance = %self.instance_id,
                    checkpoint = checkpoint_id,
                    "unknown checkpoint id"
                );
                false
            }
        }
    }

    /// Submission entries in order.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_state().history.entries().cloned().collect()
    }

    /// Every record: submissions, gate rejections, rollbacks.
    pub fn audit_trail(&self) -> Vec<HistoryRecord> {
        self.lock_state().history.records().to_vec()
    }

    pub fn metrics(&self) -> OrchestratorMetrics {
        let state = self.lock_state();
        let total_commands = state.history.total_commands();
        let blocked_commands = state.history.blocked_commands();
        OrchestratorMetrics {
            total_commands,
            blocked_commands,
            block_rate: outcome::block_rate(blocked_commands, total_commands),
            divergence_cap: self.gating.divergence_cap,
            recovery_threshold: self.gating.recovery_threshold,
        }
    }
}

fn blocked(
    command: &str,
    intent: Intent,
    reason: BlockReason,
    plan: Option<ExecutionPlan>,
) -> SubmitOutcome {
    SubmitOutcome::Blocked(BlockedResult {
        command: command.to_string(),
        intent,
        reason,
        plan,
    })
}
