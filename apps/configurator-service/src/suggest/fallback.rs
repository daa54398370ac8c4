//! Deterministic suggestion used when the generator fails.

use std::collections::BTreeMap;

use crate::models::{CatalogItem, OptionSet, RecommendedConfig, SuggestionReply};

/// Warning attached to every fallback suggestion.
pub const FALLBACK_WARNING: &str =
    "AI service temporarily unavailable. Showing default configuration.";

/// First offered option of each category, no packages.
#[must_use]
pub fn fallback_reply(model: &str, options: &OptionSet) -> SuggestionReply {
    fn first<T: CatalogItem>(items: &[T]) -> Option<String> {
        items.first().map(|i| i.code().to_string())
    }

    let recommended_config = RecommendedConfig {
        engine: first(&options.engines),
        drivetrain: first(&options.drivetrains),
        exterior_color: first(&options.exterior_colors),
        interior: first(&options.interiors),
        wheels: None,
        packages: Vec::new(),
        individual_options: Vec::new(),
    };

    let reasoning = BTreeMap::from([
        ("engine".to_string(), format!("Default engine option for {model}")),
        ("drivetrain".to_string(), "Standard drivetrain configuration".to_string()),
        ("color".to_string(), format!("Popular color choice for {model}")),
        ("interior".to_string(), "Standard interior option".to_string()),
        ("packages".to_string(), "No packages selected in fallback mode".to_string()),
        (
            "overall".to_string(),
            format!(
                "Standard configuration recommended for {model}. AI service temporarily unavailable."
            ),
        ),
    ]);

    SuggestionReply {
        recommended_config,
        reasoning,
        alternatives: BTreeMap::new(),
        warnings: vec![FALLBACK_WARNING.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn picks_first_offered_options() {
        let catalog = Catalog::embedded().unwrap();
        let options = catalog.get_options_for_model("X3");
        let reply = fallback_reply("X3", &options);

        let rec = &reply.recommended_config;
        assert_eq!(rec.engine.as_deref(), Some(options.engines[0].code.as_str()));
        assert_eq!(rec.drivetrain.as_deref(), Some(options.drivetrains[0].code.as_str()));
        assert_eq!(rec.interior.as_deref(), Some(options.interiors[0].code.as_str()));
        assert!(rec.packages.is_empty());
        assert_eq!(reply.warnings, vec![FALLBACK_WARNING]);
        assert_eq!(reply.reasoning["engine"], "Default engine option for X3");
    }

    #[test]
    fn empty_option_set_yields_nulls() {
        let reply = fallback_reply("Isetta", &OptionSet::default());
        assert_eq!(reply.recommended_config, RecommendedConfig::default());
    }
}
