//! Suggestion and comparison orchestration.

use std::sync::Arc;
use std::time::Instant;

use super::client::{GeneratorError, TextGenerator};
use super::fallback::{FALLBACK_WARNING, fallback_reply};
use super::parse::parse_reply;
use super::preferences::{analyze_preferences, model_recommendations};
use super::prompt::{PromptContext, build_compare_prompt, build_prompt};
use crate::catalog::Catalog;
use crate::models::{
    ComparedConfiguration, Comparison, Configuration, Suggestion, SuggestionSource,
};
use crate::observability::metrics;
use crate::pricing::PriceCalculator;
use crate::rules::ConfigurationValidator;

/// Errors that stop a suggestion or comparison outright.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// Model is not in the catalog.
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// No generator is configured.
    #[error("AI suggestion service unavailable; configure an API key")]
    Unavailable,
}

/// Builds suggestions from the generator and checks them with the core engine.
#[derive(Clone)]
pub struct SuggestionService {
    catalog: Arc<Catalog>,
    validator: ConfigurationValidator,
    calculator: PriceCalculator,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl std::fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionService")
            .field("generator", &self.generator.is_some())
            .finish_non_exhaustive()
    }
}

impl SuggestionService {
    /// Create a service. `generator` is `None` when no API key is configured.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        validator: ConfigurationValidator,
        calculator: PriceCalculator,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            catalog,
            validator,
            calculator,
            generator,
        }
    }

    /// Whether a generator is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Suggest a configuration for `model` from free-text preferences.
    ///
    /// A failed or unparsable generator reply degrades to a fallback built
    /// from the first option of each category. Either way the recommendation
    /// is validated and priced locally.
    ///
    /// # Errors
    ///
    /// [`SuggestError::UnknownModel`] for models not in the catalog and
    /// [`SuggestError::Unavailable`] when no generator is configured.
    pub async fn suggest(
        &self,
        model: &str,
        preferences: &str,
        current: &Configuration,
    ) -> Result<Suggestion, SuggestError> {
        let entry = self
            .catalog
            .get_model(model)
            .ok_or_else(|| SuggestError::UnknownModel(model.to_string()))?;
        let generator = self.generator.as_ref().ok_or(SuggestError::Unavailable)?;

        let analysis = analyze_preferences(preferences);
        let options = self.catalog.get_options_for_model(model);
        let recommendations = model_recommendations(entry);
        let prompt = build_prompt(&PromptContext {
            model: entry,
            preferences,
            analysis: &analysis,
            options: &options,
            recommendations: &recommendations,
            current,
        });

        tracing::info!(
            model = %model,
            prompt_len = prompt.len(),
            "Requesting AI suggestion"
        );

        let parsed = match timed_generate(generator.as_ref(), &prompt).await {
            Ok(text) => match parse_reply(&text) {
                Ok(reply) => Some(reply),
                Err(e) => {
                    tracing::warn!(model = %model, error = %e, "Unparsable generator reply");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(model = %model, error = %e, "Generator call failed");
                None
            }
        };
        let (reply, source) = match parsed {
            Some(reply) => (reply, SuggestionSource::Ai),
            None => (fallback_reply(model, &options), SuggestionSource::Fallback),
        };

        let configuration = reply.recommended_config.to_configuration();
        let validation = self.validator.validate(model, &configuration);
        let price_estimate = self.calculator.calculate_price(model, &configuration);

        let mut warnings = reply.warnings;
        if !validation.valid {
            warnings.push(format!(
                "Recommended configuration has {} constraint violation(s)",
                validation.errors.len()
            ));
        }

        metrics::record_suggestion(source.as_str());
        tracing::info!(
            model = %model,
            source = source.as_str(),
            valid = validation.valid,
            total = %price_estimate.estimated_total,
            "Suggestion ready"
        );

        Ok(Suggestion {
            model: model.to_string(),
            source,
            recommended_config: reply.recommended_config,
            reasoning: reply.reasoning,
            alternatives: reply.alternatives,
            warnings,
            price_estimate,
            validation,
            preference_analysis: analysis,
        })
    }

    /// Compare two configurations of one model.
    ///
    /// Both sides are priced and validated locally. The narrative is added
    /// only when the generator is configured and answers.
    ///
    /// # Errors
    ///
    /// [`SuggestError::UnknownModel`] for models not in the catalog.
    pub async fn compare(
        &self,
        model: &str,
        first: Configuration,
        second: Configuration,
    ) -> Result<Comparison, SuggestError> {
        if self.catalog.get_model(model).is_none() {
            return Err(SuggestError::UnknownModel(model.to_string()));
        }

        let mut warnings = Vec::new();
        let narrative = match &self.generator {
            Some(generator) => {
                let prompt = build_compare_prompt(model, &first, &second);
                match timed_generate(generator.as_ref(), &prompt).await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        tracing::warn!(model = %model, error = %e, "Comparison narrative failed");
                        warnings.push(FALLBACK_WARNING.to_string());
                        None
                    }
                }
            }
            None => {
                warnings.push("AI comparison unavailable; showing price comparison only".to_string());
                None
            }
        };

        let config1 = self.side(model, first);
        let config2 = self.side(model, second);
        let price_difference = config2.price.estimated_total - config1.price.estimated_total;

        Ok(Comparison {
            model: model.to_string(),
            config1,
            config2,
            price_difference,
            narrative,
            warnings,
        })
    }

    fn side(&self, model: &str, configuration: Configuration) -> ComparedConfiguration {
        ComparedConfiguration {
            price: self.calculator.calculate_price(model, &configuration),
            validation: self.validator.validate(model, &configuration),
            configuration,
        }
    }
}

async fn timed_generate(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<String, GeneratorError> {
    let started = Instant::now();
    let result = generator.generate(prompt).await;
    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::record_generator_latency(outcome, started.elapsed().as_secs_f64());
    result
}
