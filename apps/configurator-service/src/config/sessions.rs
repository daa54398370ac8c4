//! Saved-configuration session store configuration.

use serde::{Deserialize, Serialize};

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Maximum saved configurations per session.
    #[serde(default = "default_max_saved")]
    pub max_saved: usize,
    /// Maximum live sessions; the least recently saved-to session is evicted
    /// when a new one would exceed it.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_saved: default_max_saved(),
            max_sessions: default_max_sessions(),
        }
    }
}

const fn default_max_saved() -> usize {
    50
}

const fn default_max_sessions() -> usize {
    10_000
}
