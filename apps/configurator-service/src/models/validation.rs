//! Validation result types.

use serde::{Deserialize, Serialize};

/// Kinds of validation errors. Each one invalidates the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Selected engine cannot be paired with the selected drivetrain.
    EngineDrivetrainIncompatible,
    /// A selected package needs packages that are not selected.
    MissingRequiredPackages,
    /// More than one member of an exclusion group is selected.
    IncompatibleOptions,
    /// A selected option needs options that are not selected.
    MissingRequiredOptions,
    /// The model requires options that are not selected.
    ModelRequiredOptions,
    /// The model does not allow selected options.
    ModelExcludedOptions,
}

impl IssueKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EngineDrivetrainIncompatible => "engine_drivetrain_incompatible",
            Self::MissingRequiredPackages => "missing_required_packages",
            Self::IncompatibleOptions => "incompatible_options",
            Self::MissingRequiredOptions => "missing_required_options",
            Self::ModelRequiredOptions => "model_required_options",
            Self::ModelExcludedOptions => "model_excluded_options",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Violation kind.
    pub kind: IssueKind,
    /// Human-readable message.
    pub message: String,
    /// Offending option codes (missing or conflicting).
    pub codes: Vec<String>,
    /// Rule reason text, when the rule carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Allowed alternatives (drivetrains for an engine).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl ValidationIssue {
    /// Create an issue with the offending codes.
    #[must_use]
    pub fn new(kind: IssueKind, message: impl Into<String>, codes: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            codes,
            reason: None,
            allowed: None,
        }
    }

    /// Attach the rule reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach allowed alternatives.
    #[must_use]
    pub fn with_allowed(mut self, allowed: Vec<String>) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

/// Kinds of non-blocking warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The model is not in the catalog; only global rules were applied.
    UnknownModel,
    /// The selected engine is not offered on the model.
    EngineNotOffered,
    /// The selected drivetrain is not offered on the model.
    DrivetrainNotOffered,
    /// A selected package is not offered on the model.
    PackageNotOffered,
    /// The model ships with packages that are not selected.
    ModelMandatoryPackages,
    /// Produced by the suggestion service (fallback, AI failures).
    Suggestion,
}

/// A non-blocking observation about a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Warning kind.
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
    /// Related option codes.
    #[serde(default)]
    pub codes: Vec<String>,
}

impl ValidationWarning {
    /// Create a warning.
    #[must_use]
    pub fn new(kind: WarningKind, message: impl Into<String>, codes: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            codes,
        }
    }
}

/// Kinds of advisory suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// Popular package pairing.
    PackageCombo,
    /// Sportier option for performance-oriented models.
    PerformanceEnhancement,
    /// Safety equipment for family vehicles.
    Safety,
    /// Climate-related equipment.
    Seasonal,
    /// Appearance pairing.
    Styling,
}

/// A deterministic recommendation that never affects validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Advisory kind.
    pub kind: AdvisoryKind,
    /// Recommendation text.
    pub message: String,
    /// Customer benefit.
    pub benefit: String,
}

/// Outcome of validating one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub valid: bool,
    /// Rule violations, in rule evaluation order.
    pub errors: Vec<ValidationIssue>,
    /// Non-blocking warnings.
    pub warnings: Vec<ValidationWarning>,
    /// Advisory suggestions.
    pub suggestions: Vec<Advisory>,
}

impl ValidationResult {
    /// Build a result; validity is derived from the error list.
    #[must_use]
    pub fn new(
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationWarning>,
        suggestions: Vec<Advisory>,
    ) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
        }
    }

    /// Errors of one kind.
    pub fn errors_of(&self, kind: IssueKind) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Whether any error of the kind was recorded.
    #[must_use]
    pub fn has_error(&self, kind: IssueKind) -> bool {
        self.errors_of(kind).next().is_some()
    }

    /// Whether any warning of the kind was recorded.
    #[must_use]
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}
