//! Catalog source configuration.

use serde::{Deserialize, Serialize};

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog YAML file. The embedded catalog is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}
