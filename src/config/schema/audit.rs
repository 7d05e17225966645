use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional JSONL sink mirroring the in-memory history log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// `~` is expanded. Unset means history lives in memory only.
    #[serde(default)]
    pub log_path: Option<String>,
}

impl AuditConfig {
    pub fn resolved_log_path(&self) -> Option<PathBuf> {
        self.log_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
    }
}
