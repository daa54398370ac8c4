//! Catalog reference data types.
//!
//! These types mirror the layout of the catalog YAML document. They are
//! immutable once loaded; lookups live on [`crate::catalog::Catalog`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Money;

/// Common view over every priced catalog entry.
pub trait CatalogItem {
    /// Unique option code (the configuration key or value).
    fn code(&self) -> &str;
    /// Display name.
    fn name(&self) -> &str;
    /// Price delta over the model base price.
    fn price(&self) -> Money;
}

macro_rules! impl_catalog_item {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl CatalogItem for $ty {
                fn code(&self) -> &str {
                    &self.code
                }

                fn name(&self) -> &str {
                    &self.name
                }

                fn price(&self) -> Money {
                    self.price
                }
            }
        )+
    };
}

/// A named group of models (e.g. "SUVs").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Model names in this series. Not every name has full catalog data.
    pub models: Vec<String>,
}

/// EPA fuel economy (MPGe for electric models).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelEconomy {
    /// City rating.
    pub city: u32,
    /// Highway rating.
    pub highway: u32,
    /// Combined rating.
    pub combined: u32,
}

/// Exterior dimensions in inches, cargo volume in cubic feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Overall length.
    pub length: f64,
    /// Overall width.
    pub width: f64,
    /// Overall height.
    pub height: f64,
    /// Wheelbase.
    pub wheelbase: f64,
    /// Cargo volume.
    pub cargo: f64,
}

/// Headline performance figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    /// 0-60 mph time.
    pub acceleration: String,
    /// Top speed.
    pub top_speed: String,
    /// Power output.
    pub power: String,
    /// Torque output.
    pub torque: String,
}

/// A vehicle model with full configuration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model identifier used in requests (e.g. "X3", "3 Series").
    pub code: String,
    /// Display name of the base trim.
    pub name: String,
    /// Category (SUV, Sedan, Electric, ...).
    pub category: String,
    /// Base MSRP.
    pub base_price: Money,
    /// Body style.
    pub body_style: String,
    /// Drivetrain description.
    pub drivetrain: String,
    /// Fuel economy.
    pub fuel_economy: FuelEconomy,
    /// Dimensions.
    pub dimensions: Dimensions,
    /// Performance figures.
    pub performance: Performance,
    /// Engine codes offered on this model.
    pub engines: Vec<String>,
    /// Drivetrain codes offered on this model.
    pub drivetrains: Vec<String>,
    /// Trim levels.
    pub trim_levels: Vec<String>,
    /// Electric range in miles per trim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub battery_range: BTreeMap<String, u32>,
    /// Marketing description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Model {
    /// Marketing description, falling back to a generic sentence.
    #[must_use]
    pub fn description(&self) -> String {
        self.description.clone().unwrap_or_else(|| {
            format!(
                "The BMW {} delivers exceptional performance and luxury in its class.",
                self.code
            )
        })
    }

    /// Whether this model is a battery-electric vehicle.
    #[must_use]
    pub fn is_electric(&self) -> bool {
        self.category.contains("Electric")
    }
}

/// An engine option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    /// Engine code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price delta.
    pub price: Money,
    /// Power output.
    #[serde(default)]
    pub power: Option<String>,
    /// Torque output.
    #[serde(default)]
    pub torque: Option<String>,
    /// Fuel type.
    #[serde(default)]
    pub fuel_type: Option<String>,
}

/// A drivetrain option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drivetrain {
    /// Drivetrain code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price delta.
    pub price: Money,
}

/// An exterior paint option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExteriorColor {
    /// Color code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price delta.
    pub price: Money,
    /// Metallic paint.
    #[serde(default)]
    pub metallic: bool,
    /// Special-order paint.
    #[serde(default)]
    pub special: bool,
}

/// A wheel option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wheel {
    /// Wheel code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price delta.
    pub price: Money,
    /// Rim diameter in inches.
    pub size: u8,
    /// Style family.
    pub style: String,
}

/// An interior upholstery option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interior {
    /// Interior code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price delta.
    pub price: Money,
    /// Upholstery material.
    pub material: String,
}

/// A priced bundle of features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package code (configuration key).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price.
    pub price: Money,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Included features.
    #[serde(default)]
    pub features: Vec<String>,
    /// Codes this package cannot be combined with.
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    /// Codes this package requires.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Models this package is offered on.
    #[serde(default)]
    pub models: Vec<String>,
}

impl Package {
    /// Whether the package is offered on the given model.
    #[must_use]
    pub fn is_offered_on(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }
}

/// A standalone priced option flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualOption {
    /// Option code (configuration key).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Price.
    pub price: Money,
}

impl_catalog_item!(Engine, Drivetrain, ExteriorColor, Wheel, Interior, Package, IndividualOption);

// =============================================================================
// Constraint tables
// =============================================================================

/// A group of option codes of which at most one may be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionGroup {
    /// Mutually exclusive codes.
    pub options: Vec<String>,
    /// Why they conflict.
    pub reason: String,
}

/// A base option that needs other options to be selected with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCombination {
    /// Triggering option.
    pub base: String,
    /// Options that must accompany the base.
    pub requires: Vec<String>,
    /// Why they are required.
    pub reason: String,
}

/// Per-model option rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConstraints {
    /// Options that must always be selected.
    #[serde(default)]
    pub required_options: Vec<String>,
    /// Options that can never be selected.
    #[serde(default)]
    pub excluded_options: Vec<String>,
    /// Packages the model ships with (advisory).
    #[serde(default)]
    pub mandatory_packages: Vec<String>,
}

/// Regional standard-equipment requirements (informational).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalRequirements {
    /// Safety equipment.
    #[serde(default)]
    pub required_safety: Vec<String>,
    /// Emissions equipment.
    #[serde(default)]
    pub emissions_compliance: Vec<String>,
    /// Lighting equipment.
    #[serde(default)]
    pub lighting_requirements: Vec<String>,
}

/// Constraint tables as authored in the catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintTables {
    /// Engine code to allowed drivetrain codes.
    #[serde(default)]
    pub engine_drivetrain: BTreeMap<String, Vec<String>>,
    /// Package code to required package codes.
    #[serde(default)]
    pub package_dependencies: BTreeMap<String, Vec<String>>,
    /// Mutually exclusive groups.
    #[serde(default)]
    pub incompatible_options: Vec<ExclusionGroup>,
    /// Required combinations.
    #[serde(default)]
    pub required_combinations: Vec<RequiredCombination>,
    /// Model name to model-specific rules.
    #[serde(default)]
    pub model_specific: BTreeMap<String, ModelConstraints>,
    /// Regional requirements.
    #[serde(default)]
    pub regional: RegionalRequirements,
}

/// All constraints applicable to one model: global tables merged with the
/// model-specific rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Engine code to allowed drivetrain codes.
    pub engine_drivetrain: BTreeMap<String, Vec<String>>,
    /// Package code to required package codes.
    pub package_dependencies: BTreeMap<String, Vec<String>>,
    /// Mutually exclusive groups.
    pub incompatible_options: Vec<ExclusionGroup>,
    /// Required combinations.
    pub required_combinations: Vec<RequiredCombination>,
    /// Model-specific rules (empty for models without any).
    pub model_specific: ModelConstraints,
    /// Regional requirements.
    pub regional: RegionalRequirements,
}

/// The full catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    /// Model series.
    #[serde(default)]
    pub series: Vec<Series>,
    /// Models with configuration data.
    pub models: Vec<Model>,
    /// Engines.
    pub engines: Vec<Engine>,
    /// Drivetrains.
    pub drivetrains: Vec<Drivetrain>,
    /// Exterior colors.
    pub exterior_colors: Vec<ExteriorColor>,
    /// Wheels.
    #[serde(default)]
    pub wheels: Vec<Wheel>,
    /// Interiors.
    pub interiors: Vec<Interior>,
    /// Packages.
    #[serde(default)]
    pub packages: Vec<Package>,
    /// Individual options.
    #[serde(default)]
    pub individual_options: Vec<IndividualOption>,
    /// Constraint tables.
    #[serde(default)]
    pub constraints: ConstraintTables,
}

/// Everything a client needs to configure one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSet {
    /// Engines offered on the model.
    pub engines: Vec<Engine>,
    /// Drivetrains offered on the model.
    pub drivetrains: Vec<Drivetrain>,
    /// Exterior colors.
    pub exterior_colors: Vec<ExteriorColor>,
    /// Wheels.
    pub wheels: Vec<Wheel>,
    /// Interiors.
    pub interiors: Vec<Interior>,
    /// Packages offered on the model.
    pub packages: Vec<Package>,
    /// Individual options.
    pub individual_options: Vec<IndividualOption>,
    /// Merged constraint set.
    pub constraints: ConstraintSet,
}

impl OptionSet {
    /// True when the set carries no options at all (unknown model).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
            && self.drivetrains.is_empty()
            && self.exterior_colors.is_empty()
            && self.wheels.is_empty()
            && self.interiors.is_empty()
            && self.packages.is_empty()
            && self.individual_options.is_empty()
    }
}

/// A model listed in a series, with catalog data when available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesModel {
    /// Model name.
    pub name: String,
    /// Series name.
    pub series: String,
    /// Whether the model can be configured.
    pub configurable: bool,
    /// Category, when configurable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Base price, when configurable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<Money>,
}
