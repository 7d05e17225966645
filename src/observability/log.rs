use super::traits::{Observer, ObserverEvent};
use tracing::info;

/// Log-based observer, emits one tracing line per event
#[derive(Debug, Default)]
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        let name = event.name();
        match event {
            ObserverEvent::CommandClassified {
                command,
                intent_label,
                verdict,
                confidence,
            } => {
                info!(
                    command = %command,
                    intent = %intent_label,
                    verdict = %verdict,
                    confidence = confidence,
                    "{name}"
                );
            }
            ObserverEvent::CommandBlocked {
                command,
                intent_label,
                reason,
            } => {
                info!(command = %command, intent = %intent_label, reason = %reason, "{name}");
            }
            ObserverEvent::PlanApproved {
                intent_label,
                divergence_estimate,
                recovery_rate_estimate,
            } => {
                info!(
                    intent = %intent_label,
                    divergence = divergence_estimate,
                    recovery = recovery_rate_estimate,
                    "{name}"
                );
            }
            ObserverEvent::RollbackAttempted {
                checkpoint_id,
                intent_label,
                success,
            } => {
                info!(
                    checkpoint = %checkpoint_id,
                    intent = ?intent_label,
                    success = success,
                    "{name}"
                );
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
