#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! Command safety orchestrator.
//!
//! Classifies a raw shell command into an intent, expands accepted intents
//! into a checkpointed execution plan, gates the plan on divergence and
//! recovery-rate thresholds, and dispatches rollbacks to per-intent handlers.
//! Nothing here executes the command itself.

pub mod app;
pub mod checkpoint;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod orchestrator;
pub mod planner;
pub mod ui;

pub use checkpoint::{CheckpointStore, RollbackHandler, RollbackOutcome};
pub use classifier::{Intent, IntentClassifier, SafetyVerdict};
pub use config::Config;
pub use error::{OrchestratorError, Result};
pub use orchestrator::{
    BlockReason, BlockedResult, HistoryEntry, HistoryRecord, Orchestrator, OrchestratorMetrics,
    SubmitOutcome,
};
pub use planner::{Checkpoint, ExecutionPlan, ExecutionPlanner, Phase};
