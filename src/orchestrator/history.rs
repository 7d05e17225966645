use super::outcome::BlockReason;
use crate::checkpoint::RollbackOutcome;
use crate::classifier::{Intent, SafetyVerdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted command, recorded before any gate runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub intent_label: String,
    pub safety_verdict: SafetyVerdict,
}

impl HistoryEntry {
    pub fn new(command: &str, intent: &Intent) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.to_string(),
            intent_label: intent.raw_intent_label.clone(),
            safety_verdict: intent.safety_verdict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryRecord {
    Submission(HistoryEntry),
    /// A classified command rejected by the divergence or recovery gate.
    GateBlocked {
        timestamp: DateTime<Utc>,
        command: String,
        intent_label: String,
        reason: BlockReason,
    },
    Rollback {
        timestamp: DateTime<Utc>,
        checkpoint_id: String,
        outcome: RollbackOutcome,
    },
}

/// Append-only, submission-ordered audit log.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.records.iter().filter_map(|record| match record {
            HistoryRecord::Submission(entry) => Some(entry),
            HistoryRecord::GateBlocked { .. } | HistoryRecord::Rollback { .. } => None,
        })
    }

    pub fn total_commands(&self) -> u64 {
        count(self.entries())
    }

    /// `Fail` submissions plus gate rejections.
    pub fn blocked_commands(&self) -> u64 {
        count(self.records.iter().filter(|record| match record {
            HistoryRecord::Submission(entry) => entry.safety_verdict.is_blocking(),
            HistoryRecord::GateBlocked { .. } => true,
            HistoryRecord::Rollback { .. } => false,
        }))
    }
}

fn count<T>(items: impl Iterator<Item = T>) -> u64 {
    u64::try_from(items.count()).unwrap_or(u64::MAX)
}
