use crate::classifier::SafetyVerdict;

/// Events the observer can record
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    CommandClassified {
        command: String,
        intent_label: String,
        verdict: SafetyVerdict,
        confidence: f64,
    },
    CommandBlocked {
        command: String,
        intent_label: String,
        reason: String,
    },
    PlanApproved {
        intent_label: String,
        divergence_estimate: f64,
        recovery_rate_estimate: f64,
    },
    RollbackAttempted {
        checkpoint_id: String,
        intent_label: Option<String>,
        success: bool,
    },
}

impl ObserverEvent {
    /// Dotted event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CommandClassified { .. } => "command.classified",
            Self::CommandBlocked { .. } => "command.blocked",
            Self::PlanApproved { .. } => "plan.approved",
            Self::RollbackAttempted { .. } => "rollback.attempted",
        }
    }
}

/// Fire-and-forget sink for orchestrator events.
///
/// Implementations must not block or fail the caller; the orchestrator never
/// looks at what a sink does with an event.
pub trait Observer: Send + Sync {
    /// Record a discrete event
    fn record_event(&self, event: &ObserverEvent);

    /// Flush any buffered data (no-op for most backends)
    fn flush(&self) {}

    /// Human-readable name of this observer
    fn name(&self) -> &str;
}
