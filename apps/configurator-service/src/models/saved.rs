//! Session-saved configuration snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Configuration;
use super::configuration::MODEL;

/// Name used when a save request carries none.
pub const DEFAULT_NAME: &str = "Untitled Configuration";

/// Model recorded when neither the request nor the configuration names one.
pub const UNKNOWN_MODEL: &str = "Unknown";

/// A named, timestamped configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    /// Display name.
    pub name: String,
    /// Model name.
    pub model: String,
    /// The configuration.
    pub configuration: Configuration,
    /// Save time (UTC).
    pub created_at: DateTime<Utc>,
}

impl SavedConfiguration {
    /// Snapshot a configuration now.
    ///
    /// The model falls back to the configuration's own `model` key, then to
    /// `"Unknown"`; a missing or blank name becomes `"Untitled Configuration"`.
    #[must_use]
    pub fn new(name: Option<String>, model: Option<String>, configuration: Configuration) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let model = model
            .filter(|m| !m.is_empty())
            .or_else(|| configuration.selection(MODEL).map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_MODEL.to_string());

        Self {
            name,
            model,
            configuration,
            created_at: Utc::now(),
        }
    }
}
