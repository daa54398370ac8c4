//! Configuration validation.
//!
//! [`ConfigurationValidator`] compiles the model's merged constraint set into
//! [`ConstraintRule`]s, evaluates them all, then adds catalog warnings and
//! advisory suggestions. Validation is a pure function of the model name, the
//! configuration and the catalog.

mod advisories;
mod constraint;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::models::configuration::{DRIVETRAIN, ENGINE};
use crate::models::{Configuration, Model, ValidationResult, ValidationWarning, WarningKind};
use crate::observability::metrics;

pub use advisories::advisories;
pub use constraint::{ConstraintRule, evaluate_all};

/// Validates configurations against the catalog's constraint tables.
#[derive(Debug, Clone)]
pub struct ConfigurationValidator {
    catalog: Arc<Catalog>,
}

impl ConfigurationValidator {
    /// Create a validator over a shared catalog.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Validate a configuration for a model.
    ///
    /// All rule violations are reported, not just the first. Unknown models
    /// are validated against the global rules and flagged with a warning.
    #[must_use]
    pub fn validate(&self, model: &str, configuration: &Configuration) -> ValidationResult {
        let constraints = self.catalog.get_constraints(model);
        let rules = ConstraintRule::compile(model, &constraints);
        let errors = evaluate_all(&rules, configuration);

        let mut warnings = Vec::new();
        match self.catalog.get_model(model) {
            Some(entry) => self.offer_warnings(entry, configuration, &mut warnings),
            None => warnings.push(ValidationWarning::new(
                WarningKind::UnknownModel,
                format!("Model {model} is not in the catalog; only global rules were applied"),
                vec![model.to_string()],
            )),
        }

        let missing_mandatory: Vec<String> = constraints
            .model_specific
            .mandatory_packages
            .iter()
            .filter(|p| !configuration.is_truthy(p))
            .cloned()
            .collect();
        if !missing_mandatory.is_empty() {
            warnings.push(ValidationWarning::new(
                WarningKind::ModelMandatoryPackages,
                format!(
                    "{model} is normally equipped with: {}",
                    missing_mandatory.join(", ")
                ),
                missing_mandatory,
            ));
        }

        let result = ValidationResult::new(errors, warnings, advisories(model, configuration));

        metrics::record_validation(result.valid);
        tracing::debug!(
            model = %model,
            valid = result.valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Configuration validated"
        );

        result
    }

    fn offer_warnings(
        &self,
        model: &Model,
        configuration: &Configuration,
        warnings: &mut Vec<ValidationWarning>,
    ) {
        if let Some(engine) = configuration.selection(ENGINE)
            && !model.engines.iter().any(|e| e == engine)
        {
            warnings.push(ValidationWarning::new(
                WarningKind::EngineNotOffered,
                format!("Engine {engine} is not offered on the {}", model.code),
                vec![engine.to_string()],
            ));
        }

        if let Some(drivetrain) = configuration.selection(DRIVETRAIN)
            && !model.drivetrains.iter().any(|d| d == drivetrain)
        {
            warnings.push(ValidationWarning::new(
                WarningKind::DrivetrainNotOffered,
                format!("Drivetrain {drivetrain} is not offered on the {}", model.code),
                vec![drivetrain.to_string()],
            ));
        }

        let not_offered: Vec<String> = configuration
            .flags()
            .filter_map(|key| self.catalog.package(key))
            .filter(|p| !p.is_offered_on(&model.code))
            .map(|p| p.code.clone())
            .collect();
        if !not_offered.is_empty() {
            warnings.push(ValidationWarning::new(
                WarningKind::PackageNotOffered,
                format!(
                    "Not offered on the {}: {}",
                    model.code,
                    not_offered.join(", ")
                ),
                not_offered,
            ));
        }
    }
}
