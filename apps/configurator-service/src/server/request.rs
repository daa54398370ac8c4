//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::models::Configuration;

/// Body of validate and price requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationRequest {
    /// Model name.
    #[serde(default)]
    pub model: String,
    /// Selections and flags.
    #[serde(default)]
    pub configuration: Configuration,
}

/// Body of a suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    /// Model name.
    #[serde(default)]
    pub model: String,
    /// Free-text customer preferences.
    #[serde(default)]
    pub preferences: String,
    /// Configuration the customer already has.
    #[serde(default)]
    pub current_config: Configuration,
}

/// Body of a comparison request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Model name.
    #[serde(default)]
    pub model: String,
    /// First configuration.
    #[serde(default)]
    pub config1: Configuration,
    /// Second configuration.
    #[serde(default)]
    pub config2: Configuration,
}

/// Body of a save request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfigurationRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Model name; falls back to the configuration's `model` key.
    #[serde(default)]
    pub model: Option<String>,
    /// The configuration to save.
    #[serde(default)]
    pub configuration: Configuration,
}
