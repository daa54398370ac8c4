//! HTTP response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{SavedConfiguration, SeriesModel};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Models in the loaded catalog.
    pub models: usize,
    /// Whether AI suggestions are configured.
    pub ai_enabled: bool,
}

/// Models of one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesModelsResponse {
    /// Series name.
    pub series: String,
    /// Listed models.
    pub models: Vec<SeriesModel>,
}

/// Result of saving a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfigurationResponse {
    /// Session holding the configuration; send it back as `x-session-id`.
    pub session_id: Uuid,
    /// Index of the saved configuration within the session.
    pub index: usize,
    /// The stored snapshot.
    pub configuration: SavedConfiguration,
}

/// Saved configurations of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConfigurationsResponse {
    /// Session id, if the request carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    /// Saved configurations, oldest first.
    pub configurations: Vec<SavedConfiguration>,
}
