//! Compiled constraint rules.
//!
//! A [`ConstraintSet`] is compiled into an ordered list of [`ConstraintRule`]
//! variants. Evaluation order is fixed: engine/drivetrain, package
//! dependencies, mutual exclusions, required combinations, model-required,
//! model-excluded. Every rule reports all of its violations.

use std::collections::BTreeMap;

use crate::models::configuration::{DRIVETRAIN, ENGINE};
use crate::models::{Configuration, ConstraintSet, IssueKind, ValidationIssue};

/// A single compatibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintRule {
    /// Selected engine must allow the selected drivetrain.
    EngineDrivetrain {
        /// Engine code to allowed drivetrain codes.
        allowed: BTreeMap<String, Vec<String>>,
    },
    /// A selected package needs other packages.
    PackageDependency {
        /// Package code.
        package: String,
        /// Required package codes.
        requires: Vec<String>,
    },
    /// At most one member of the group may be selected.
    MutualExclusion {
        /// Group members.
        options: Vec<String>,
        /// Conflict reason.
        reason: String,
    },
    /// A selected base option needs other options.
    RequiredCombination {
        /// Triggering option.
        base: String,
        /// Required options.
        requires: Vec<String>,
        /// Requirement reason.
        reason: String,
    },
    /// The model needs these options.
    ModelRequired {
        /// Model name.
        model: String,
        /// Required options.
        options: Vec<String>,
    },
    /// The model forbids these options.
    ModelExcluded {
        /// Model name.
        model: String,
        /// Excluded options.
        options: Vec<String>,
    },
}

impl ConstraintRule {
    /// Compile a constraint set into rules, in evaluation order.
    #[must_use]
    pub fn compile(model: &str, constraints: &ConstraintSet) -> Vec<Self> {
        let mut rules = vec![Self::EngineDrivetrain {
            allowed: constraints.engine_drivetrain.clone(),
        }];

        rules.extend(
            constraints
                .package_dependencies
                .iter()
                .map(|(package, requires)| Self::PackageDependency {
                    package: package.clone(),
                    requires: requires.clone(),
                }),
        );

        rules.extend(
            constraints
                .incompatible_options
                .iter()
                .map(|group| Self::MutualExclusion {
                    options: group.options.clone(),
                    reason: group.reason.clone(),
                }),
        );

        rules.extend(
            constraints
                .required_combinations
                .iter()
                .map(|rule| Self::RequiredCombination {
                    base: rule.base.clone(),
                    requires: rule.requires.clone(),
                    reason: rule.reason.clone(),
                }),
        );

        let specific = &constraints.model_specific;
        if !specific.required_options.is_empty() {
            rules.push(Self::ModelRequired {
                model: model.to_string(),
                options: specific.required_options.clone(),
            });
        }
        if !specific.excluded_options.is_empty() {
            rules.push(Self::ModelExcluded {
                model: model.to_string(),
                options: specific.excluded_options.clone(),
            });
        }

        rules
    }

    /// Evaluate the rule, returning the violation if any.
    #[must_use]
    pub fn evaluate(&self, configuration: &Configuration) -> Option<ValidationIssue> {
        match self {
            Self::EngineDrivetrain { allowed } => {
                let engine = configuration.selection(ENGINE)?;
                let drivetrain = configuration.selection(DRIVETRAIN)?;
                let allowed = allowed.get(engine).cloned().unwrap_or_default();
                if allowed.iter().any(|d| d == drivetrain) {
                    return None;
                }
                Some(
                    ValidationIssue::new(
                        IssueKind::EngineDrivetrainIncompatible,
                        format!("Engine {engine} is not compatible with {drivetrain}"),
                        vec![engine.to_string(), drivetrain.to_string()],
                    )
                    .with_allowed(allowed),
                )
            }

            Self::PackageDependency { package, requires } => {
                if !configuration.is_truthy(package) {
                    return None;
                }
                let missing = unselected(configuration, requires);
                (!missing.is_empty()).then(|| {
                    ValidationIssue::new(
                        IssueKind::MissingRequiredPackages,
                        format!("Package {package} requires: {}", missing.join(", ")),
                        missing,
                    )
                })
            }

            Self::MutualExclusion { options, reason } => {
                let conflicting = selected(configuration, options);
                (conflicting.len() > 1).then(|| {
                    ValidationIssue::new(
                        IssueKind::IncompatibleOptions,
                        format!("Cannot select {}: {reason}", conflicting.join(" and ")),
                        conflicting,
                    )
                    .with_reason(reason.clone())
                })
            }

            Self::RequiredCombination {
                base,
                requires,
                reason,
            } => {
                if !configuration.is_truthy(base) {
                    return None;
                }
                let missing = unselected(configuration, requires);
                (!missing.is_empty()).then(|| {
                    ValidationIssue::new(
                        IssueKind::MissingRequiredOptions,
                        format!("{base} requires: {}", missing.join(", ")),
                        missing,
                    )
                    .with_reason(reason.clone())
                })
            }

            Self::ModelRequired { model, options } => {
                let missing = unselected(configuration, options);
                (!missing.is_empty()).then(|| {
                    ValidationIssue::new(
                        IssueKind::ModelRequiredOptions,
                        format!("{model} requires: {}", missing.join(", ")),
                        missing,
                    )
                })
            }

            Self::ModelExcluded { model, options } => {
                let conflicting = selected(configuration, options);
                (!conflicting.is_empty()).then(|| {
                    ValidationIssue::new(
                        IssueKind::ModelExcludedOptions,
                        format!("{model} cannot have: {}", conflicting.join(", ")),
                        conflicting,
                    )
                })
            }
        }
    }

    /// Issue kind this rule reports.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        match self {
            Self::EngineDrivetrain { .. } => IssueKind::EngineDrivetrainIncompatible,
            Self::PackageDependency { .. } => IssueKind::MissingRequiredPackages,
            Self::MutualExclusion { .. } => IssueKind::IncompatibleOptions,
            Self::RequiredCombination { .. } => IssueKind::MissingRequiredOptions,
            Self::ModelRequired { .. } => IssueKind::ModelRequiredOptions,
            Self::ModelExcluded { .. } => IssueKind::ModelExcludedOptions,
        }
    }
}

/// Evaluate every rule, accumulating all violations in rule order.
#[must_use]
pub fn evaluate_all(rules: &[ConstraintRule], configuration: &Configuration) -> Vec<ValidationIssue> {
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(configuration))
        .collect()
}

fn selected(configuration: &Configuration, codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .filter(|c| configuration.is_truthy(c))
        .cloned()
        .collect()
}

fn unselected(configuration: &Configuration, codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .filter(|c| !configuration.is_truthy(c))
        .cloned()
        .collect()
}
