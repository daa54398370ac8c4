//! Domain models for the configurator service.

pub mod catalog;
pub mod configuration;
mod money;
mod pricing;
mod saved;
mod suggestion;
mod validation;

pub use catalog::{
    CatalogData, CatalogItem, ConstraintSet, ConstraintTables, Drivetrain, Engine,
    ExclusionGroup, ExteriorColor, IndividualOption, Interior, Model, ModelConstraints,
    OptionSet, Package, RegionalRequirements, RequiredCombination, Series, SeriesModel, Wheel,
};
pub use configuration::{Configuration, is_truthy};
pub use money::Money;
pub use pricing::{DiscountKind, DiscountLine, LineCategory, LineItem, PriceBreakdown};
pub use saved::SavedConfiguration;
pub use suggestion::{
    ComparedConfiguration, Comparison, PreferenceAnalysis, RecommendedConfig, Suggestion,
    SuggestionReply, SuggestionSource,
};
pub use validation::{
    Advisory, AdvisoryKind, IssueKind, ValidationIssue, ValidationResult, ValidationWarning,
    WarningKind,
};
