use serde::{Deserialize, Serialize};

pub const DEFAULT_OBSERVABILITY_BACKEND: &str = "none";

fn default_backend() -> String {
    DEFAULT_OBSERVABILITY_BACKEND.into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "none" | "log"
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}
