//! Human-readable rendering of orchestrator results.

use crate::orchestrator::{
    BlockedResult, HistoryEntry, OrchestratorMetrics, SubmitOutcome,
};
use crate::planner::ExecutionPlan;
use crate::ui::style;

pub fn render_outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Approved(plan) => render_plan(plan),
        SubmitOutcome::Blocked(result) => render_blocked(result),
    }
}

pub fn render_plan(plan: &ExecutionPlan) -> String {
    let mut lines = vec![
        format!("{} {}", style::success("✓"), style::header("APPROVED")),
        format!("  {}       {}", style::cyan("intent"), style::value(&plan.intent_label)),
        format!(
            "  {}     {:.1}%",
            style::cyan("recovery"),
            plan.recovery_rate_estimate * 100.0
        ),
        format!(
            "  {}   {:.1}%",
            style::cyan("divergence"),
            plan.divergence_estimate * 100.0
        ),
        format!(
            "  {}        {} steps, {} checkpoints",
            style::cyan("plan"),
            plan.steps.len(),
            plan.checkpoints.len()
        ),
    ];
    for (index, step) in plan.steps.iter().enumerate() {
        lines.push(format!("    {} {step}", style::accent(format!("{}.", index + 1))));
    }
    let ids: Vec<&str> = plan.checkpoints.iter().map(|c| c.id.as_str()).collect();
    lines.push(format!(
        "  {} {}",
        style::cyan("checkpoints"),
        style::dim(ids.join(", "))
    ));
    lines.join("\n")
}

pub fn render_blocked(result: &BlockedResult) -> String {
    let mut lines = vec![
        format!("{} {}", style::danger("✗ BLOCKED:"), result.reason),
        format!(
            "  {}     {}",
            style::cyan("command"),
            style::yellow(&result.command)
        ),
        format!(
            "  {}      {} ({})",
            style::cyan("intent"),
            result.intent.raw_intent_label,
            result.intent.safety_verdict
        ),
    ];
    for warning in &result.intent.warnings {
        lines.push(format!("  {} {warning}", style::yellow("!")));
    }
    lines.join("\n")
}

pub fn render_metrics(metrics: &OrchestratorMetrics) -> String {
    [
        style::header("Metrics"),
        format!("  total commands      {}", metrics.total_commands),
        format!("  blocked commands    {}", metrics.blocked_commands),
        format!("  block rate          {:.1}%", metrics.block_rate * 100.0),
        format!("  divergence cap      {:.1}%", metrics.divergence_cap * 100.0),
        format!(
            "  recovery threshold  {:.1}%",
            metrics.recovery_threshold * 100.0
        ),
    ]
    .join("\n")
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return style::dim("No commands submitted yet.");
    }
    let mut lines = vec![style::header("History")];
    for (index, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "  {} {} {} {}",
            style::accent(format!("{:>3}", index + 1)),
            style::dim(entry.timestamp.format("%H:%M:%S")),
            entry.safety_verdict,
            entry.command
        ));
        lines.push(format!("        {}", style::dim(&entry.intent_label)));
    }
    lines.join("\n")
}

pub fn render_help() -> String {
    [
        style::header("Commands"),
        format!("  {}                evaluate a shell command", style::accent("<command>")),
        format!("  {}                  show aggregate counters", style::accent("metrics")),
        format!("  {}                  list submitted commands", style::accent("history")),
        format!("  {}      roll back to a checkpoint", style::accent("rollback <ckpt-id>")),
        format!("  {}                     this help", style::accent("help")),
        format!("  {}              leave and print a summary", style::accent("quit | exit")),
    ]
    .join("\n")
}
