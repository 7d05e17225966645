use super::Config;

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Apply `ORCHESTRATE_*` variables. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("ORCHESTRATE_STRICT")
            && let Some(strict) = parse_flag(&raw)
        {
            self.gating.strict_mode = strict;
        }

        if let Ok(raw) = std::env::var("ORCHESTRATE_DIVERGENCE_CAP")
            && let Ok(cap) = raw.trim().parse::<f64>()
        {
            self.gating.divergence_cap = cap;
        }

        if let Ok(raw) = std::env::var("ORCHESTRATE_RECOVERY_THRESHOLD")
            && let Ok(threshold) = raw.trim().parse::<f64>()
        {
            self.gating.recovery_threshold = threshold;
        }

        if let Ok(backend) = std::env::var("ORCHESTRATE_OBSERVABILITY")
            && !backend.trim().is_empty()
        {
            self.observability.backend = backend.trim().to_string();
        }

        if let Ok(path) = std::env::var("ORCHESTRATE_AUDIT_LOG")
            && !path.trim().is_empty()
        {
            self.audit.log_path = Some(path.trim().to_string());
        }
    }
}
