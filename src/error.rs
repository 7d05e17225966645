use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the orchestrator.
///
/// Policy rejections are not errors: a blocked command is a normal
/// [`crate::orchestrator::SubmitOutcome::Blocked`]. These variants cover the
/// cases where the orchestrator itself cannot be built or cannot write its
/// audit trail.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Pattern tables ──────────────────────────────────────────────────
    #[error("rule: {0}")]
    Rule(#[from] RuleError),

    // ── Audit sink ──────────────────────────────────────────────────────
    #[error("audit: {0}")]
    Audit(#[from] AuditError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Rule errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("pattern {id} is not a valid regex: {message}")]
    InvalidPattern { id: String, message: String },

    #[error("pattern id must not be empty")]
    EmptyId,
}

// ─── Audit errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to open audit log {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write audit record: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to encode audit record: {0}")]
    Encode(#[from] serde_json::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
