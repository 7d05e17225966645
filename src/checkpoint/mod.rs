//! Checkpoint store and rollback dispatch.
//!
//! Holds every checkpoint produced by the planner and a map from intent label
//! to rollback handler. One handler per label; registering again replaces it.

use crate::planner::Checkpoint;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, RwLock};

/// Intent used when a legacy checkpoint carries no usable identifier.
pub const DEFAULT_ROLLBACK_INTENT: &str = "default";

/// Restores state for one intent label.
///
/// `Ok(false)`, `Err(_)` and a panic are all reported as a failed rollback.
pub trait RollbackHandler: Send + Sync {
    fn rollback(&self, checkpoint: &Checkpoint) -> anyhow::Result<bool>;
}

impl<F> RollbackHandler for F
where
    F: Fn(&Checkpoint) -> anyhow::Result<bool> + Send + Sync,
{
    fn rollback(&self, checkpoint: &Checkpoint) -> anyhow::Result<bool> {
        self(checkpoint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollbackOutcome {
    /// Checkpoint is marked non-reversible; nothing was attempted.
    Irreversible,
    /// A registered handler ran.
    Handled { intent: String, success: bool },
    /// No handler for the intent; counted as success and recorded in history.
    Untracked { intent: String },
}

impl RollbackOutcome {
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Irreversible => false,
            Self::Handled { success, .. } => *success,
            Self::Untracked { .. } => true,
        }
    }

    pub fn intent(&self) -> Option<&str> {
        match self {
            Self::Irreversible => None,
            Self::Handled { intent, .. } | Self::Untracked { intent } => Some(intent),
        }
    }
}

/// Intent a rollback should dispatch to.
///
/// Checkpoints without an intent label fall back to the first `_`-separated
/// segment of their legacy identifier, or [`DEFAULT_ROLLBACK_INTENT`]. That
/// fallback exists only to read old records.
pub fn resolve_rollback_intent(checkpoint: &Checkpoint) -> String {
    if !checkpoint.intent_label.is_empty() {
        return checkpoint.intent_label.clone();
    }

    let legacy = checkpoint
        .legacy_command
        .as_deref()
        .and_then(|command| command.split_once('_'))
        .map(|(head, _)| head)
        .filter(|head| !head.is_empty())
        .unwrap_or(DEFAULT_ROLLBACK_INTENT);

    tracing::warn!(
        checkpoint = %checkpoint.id,
        intent = legacy,
        "checkpoint has no intent label; using legacy resolution"
    );
    legacy.to_string()
}

#[derive(Default)]
pub struct CheckpointStore {
    checkpoints: RwLock<BTreeMap<String, Checkpoint>>,
    handlers: RwLock<HashMap<String, Arc<dyn RollbackHandler>>>,
}

impl fmt::Debug for CheckpointStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checkpoints = self
            .checkpoints
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len();
        let mut intents: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        intents.sort();
        f.debug_struct("CheckpointStore")
            .field("checkpoints", &checkpoints)
            .field("handlers", &intents)
            .finish()
    }
}

impl CheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rollback handler for an intent, replacing any previous one.
    pub fn register(&self, intent_label: impl Into<String>, handler: Arc<dyn RollbackHandler>) {
        let intent_label = intent_label.into();
        let replaced = self
            .handlers
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(intent_label.clone(), handler)
            .is_some();
        tracing::debug!(intent = %intent_label, replaced, "rollback handler registered");
    }

    pub fn has_handler(&self, intent_label: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(intent_label)
    }

    /// Take ownership of a plan's checkpoints, approved or gate-blocked. Ids
    /// already held are left untouched.
    pub fn retain(&self, checkpoints: &[Checkpoint]) {
        let mut held = self
            .checkpoints
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for checkpoint in checkpoints {
            held.entry(checkpoint.id.clone())
                .or_insert_with(|| checkpoint.clone());
        }
    }

    pub fn get(&self, id: &str) -> Option<Checkpoint> {
        self.checkpoints
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.checkpoints
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Roll back to `checkpoint`.
    ///
    /// The handler runs without any store lock held, so it may take as long
    /// as it needs; timeouts are the caller's concern.
    pub fn rollback(&self, checkpoint: &Checkpoint) -> RollbackOutcome {
        if !checkpoint.reversible {
            tracing::warn!(checkpoint = %checkpoint.id, "checkpoint is not reversible");
            return RollbackOutcome::Irreversible;
        }

        let intent = resolve_rollback_intent(checkpoint);
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&intent)
            .cloned();

        let Some(handler) = handler else {
            tracing::warn!(
                checkpoint = %checkpoint.id,
                intent = %intent,
                "no rollback handler registered; recording untracked rollback"
            );
            return RollbackOutcome::Untracked { intent };
        };

        let success = match catch_unwind(AssertUnwindSafe(|| handler.rollback(checkpoint))) {
            Ok(Ok(success)) => success,
            Ok(Err(error)) => {
                tracing::warn!(
                    checkpoint = %checkpoint.id,
                    intent = %intent,
                    error = %error,
                    "rollback handler failed"
                );
                false
            }
            Err(_) => {
                tracing::error!(
                    checkpoint = %checkpoint.id,
                    intent = %intent,
                    "rollback handler panicked"
                );
                false
            }
        };

        RollbackOutcome::Handled { intent, success }
    }
}
