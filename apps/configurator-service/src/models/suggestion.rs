//! Suggestion and comparison types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::configuration::{self, Configuration};
use super::{Money, PriceBreakdown, ValidationResult};

/// Themes detected in free-text customer preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceAnalysis {
    /// Mentions budget or value.
    pub budget_conscious: bool,
    /// Mentions speed, handling or sport.
    pub performance_oriented: bool,
    /// Mentions comfort or premium features.
    pub luxury_oriented: bool,
    /// Mentions technology or connectivity.
    pub tech_savvy: bool,
    /// Mentions family, safety or space.
    pub family_oriented: bool,
    /// Mentions efficiency or electrification.
    pub eco_conscious: bool,
}

/// A recommended selection, as proposed by the generator or the fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedConfig {
    /// Engine code.
    #[serde(default)]
    pub engine: Option<String>,
    /// Drivetrain code.
    #[serde(default)]
    pub drivetrain: Option<String>,
    /// Exterior color code.
    #[serde(default)]
    pub exterior_color: Option<String>,
    /// Interior code.
    #[serde(default)]
    pub interior: Option<String>,
    /// Wheel code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheels: Option<String>,
    /// Package codes.
    #[serde(default)]
    pub packages: Vec<String>,
    /// Individual option codes.
    #[serde(default)]
    pub individual_options: Vec<String>,
}

impl RecommendedConfig {
    /// Flatten into a configuration map the validator and calculator accept.
    ///
    /// Package and option codes that collide with a selection key are
    /// dropped so they cannot replace the selected code.
    #[must_use]
    pub fn to_configuration(&self) -> Configuration {
        let selections = [
            (configuration::ENGINE, &self.engine),
            (configuration::DRIVETRAIN, &self.drivetrain),
            (configuration::EXTERIOR_COLOR, &self.exterior_color),
            (configuration::INTERIOR, &self.interior),
            (configuration::WHEELS, &self.wheels),
        ];

        let mut config = Configuration::new();
        for (key, value) in selections {
            if let Some(code) = value {
                config.insert(key, code.clone());
            }
        }
        for code in self
            .packages
            .iter()
            .chain(&self.individual_options)
            .filter(|code| !configuration::SELECTION_KEYS.contains(&code.as_str()))
        {
            config.insert(code.clone(), true);
        }
        config
    }
}

/// Structured reply expected from the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionReply {
    /// Recommended selection.
    pub recommended_config: RecommendedConfig,
    /// Reasoning keyed by topic (engine, drivetrain, color, ...).
    #[serde(default)]
    pub reasoning: BTreeMap<String, String>,
    /// Alternatives keyed by flavor (budget_option, ...).
    #[serde(default)]
    pub alternatives: BTreeMap<String, String>,
    /// Trade-offs to be aware of.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Parsed from the generator reply.
    Ai,
    /// Built locally because the generator failed.
    Fallback,
}

impl SuggestionSource {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

/// A configuration suggestion, validated and priced locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Model name.
    pub model: String,
    /// Origin of the recommendation.
    pub source: SuggestionSource,
    /// Recommended selection.
    pub recommended_config: RecommendedConfig,
    /// Reasoning keyed by topic.
    pub reasoning: BTreeMap<String, String>,
    /// Alternatives keyed by flavor.
    pub alternatives: BTreeMap<String, String>,
    /// Warnings from the generator and the service.
    pub warnings: Vec<String>,
    /// Price of the recommended configuration.
    pub price_estimate: PriceBreakdown,
    /// Validation of the recommended configuration.
    pub validation: ValidationResult,
    /// Detected preference themes.
    pub preference_analysis: PreferenceAnalysis,
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparedConfiguration {
    /// The configuration.
    pub configuration: Configuration,
    /// Its price.
    pub price: PriceBreakdown,
    /// Its validation.
    pub validation: ValidationResult,
}

/// Side-by-side comparison of two configurations of the same model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Model name.
    pub model: String,
    /// First configuration.
    pub config1: ComparedConfiguration,
    /// Second configuration.
    pub config2: ComparedConfiguration,
    /// `config2` estimated total minus `config1` estimated total.
    pub price_difference: Money,
    /// Generated narrative, when the generator answered.
    pub narrative: Option<String>,
    /// Warnings (generator unavailable or failed).
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_config_flattens_to_flags() {
        let rec = RecommendedConfig {
            engine: Some("B58_3_0T".into()),
            drivetrain: Some("xDrive".into()),
            exterior_color: None,
            interior: Some("Dakota_Black".into()),
            wheels: None,
            packages: vec!["Premium_Package".into()],
            individual_options: vec!["Sunroof".into()],
        };
        let config = rec.to_configuration();

        assert_eq!(config.selection("engine"), Some("B58_3_0T"));
        assert_eq!(config.selection("exterior_color"), None);
        assert!(config.is_truthy("Premium_Package"));
        assert!(config.is_truthy("Sunroof"));
        assert_eq!(config.len(), 5);
    }

    #[test]
    fn selection_keys_in_code_lists_do_not_override_selections() {
        let rec = RecommendedConfig {
            engine: Some("B58_3_0T".into()),
            packages: vec!["engine".into(), "Premium_Package".into()],
            individual_options: vec!["drivetrain".into(), "model".into()],
            ..RecommendedConfig::default()
        };
        let config = rec.to_configuration();

        assert_eq!(config.selection("engine"), Some("B58_3_0T"));
        assert_eq!(config.get("drivetrain"), None);
        assert_eq!(config.get("model"), None);
        assert!(config.is_truthy("Premium_Package"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn reply_tolerates_nulls_and_missing_sections() {
        let reply: SuggestionReply = serde_json::from_str(
            r#"{"recommended_config": {"engine": null, "packages": ["Technology_Package"]}}"#,
        )
        .unwrap();
        assert_eq!(reply.recommended_config.engine, None);
        assert_eq!(reply.recommended_config.packages, vec!["Technology_Package"]);
        assert!(reply.reasoning.is_empty());
        assert!(reply.warnings.is_empty());
    }
}
