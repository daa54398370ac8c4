//! Read-only vehicle catalog.
//!
//! The catalog is built once at startup from the embedded YAML document (or a
//! file named in configuration), checked for referential integrity, and then
//! shared immutably behind an `Arc` by every request handler.
//!
//! # Usage
//!
//! ```rust,ignore
//! use configurator_service::catalog::Catalog;
//!
//! let catalog = Catalog::embedded()?;
//! let x3 = catalog.get_model("X3");
//! let options = catalog.get_options_for_model("X3");
//! ```

mod loader;

use std::path::Path;

use crate::models::{
    CatalogData, CatalogItem, ConstraintSet, Drivetrain, Engine, ExteriorColor, IndividualOption,
    Interior, Model, OptionSet, Package, Series, SeriesModel, Wheel,
};

pub use loader::{CatalogError, EMBEDDED_CATALOG};

/// Immutable catalog of models, options and constraint tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
}

impl Catalog {
    /// Build a catalog from already-parsed data, checking integrity.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        loader::check_integrity(&data)?;
        Ok(Self { data })
    }

    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Parse a catalog YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            data: loader::parse(yaml)?,
        })
    }

    /// Load a catalog YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Ok(Self {
            data: loader::load_file(path.as_ref())?,
        })
    }

    /// Load from `path` when given, otherwise use the embedded catalog.
    pub fn load(path: Option<&str>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    // =========================================================================
    // Models and series
    // =========================================================================

    /// Look up a model by name.
    #[must_use]
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.data.models.iter().find(|m| m.code == name)
    }

    /// Names of all configurable models, in catalog order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.data.models.iter().map(|m| m.code.as_str())
    }

    /// All models.
    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.data.models
    }

    /// All series.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.data.series
    }

    /// Models listed in a series, or `None` for an unknown series.
    #[must_use]
    pub fn models_for_series(&self, series: &str) -> Option<Vec<SeriesModel>> {
        let entry = self.data.series.iter().find(|s| s.name == series)?;
        Some(
            entry
                .models
                .iter()
                .map(|name| {
                    let model = self.get_model(name);
                    SeriesModel {
                        name: name.clone(),
                        series: entry.name.clone(),
                        configurable: model.is_some(),
                        category: model.map(|m| m.category.clone()),
                        base_price: model.map(|m| m.base_price),
                    }
                })
                .collect(),
        )
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Options and merged constraints for a model.
    ///
    /// Engines, drivetrains and packages are filtered to those the model
    /// offers. An unknown model yields an empty option set.
    #[must_use]
    pub fn get_options_for_model(&self, name: &str) -> OptionSet {
        let Some(model) = self.get_model(name) else {
            return OptionSet::default();
        };

        OptionSet {
            engines: self
                .data
                .engines
                .iter()
                .filter(|e| model.engines.contains(&e.code))
                .cloned()
                .collect(),
            drivetrains: self
                .data
                .drivetrains
                .iter()
                .filter(|d| model.drivetrains.contains(&d.code))
                .cloned()
                .collect(),
            exterior_colors: self.data.exterior_colors.clone(),
            wheels: self.data.wheels.clone(),
            interiors: self.data.interiors.clone(),
            packages: self
                .data
                .packages
                .iter()
                .filter(|p| p.is_offered_on(&model.code))
                .cloned()
                .collect(),
            individual_options: self.data.individual_options.clone(),
            constraints: self.get_constraints(name),
        }
    }

    /// Global constraint tables merged with the model's own rules.
    ///
    /// Unknown models get the global tables only.
    #[must_use]
    pub fn get_constraints(&self, name: &str) -> ConstraintSet {
        let tables = &self.data.constraints;
        ConstraintSet {
            engine_drivetrain: tables.engine_drivetrain.clone(),
            package_dependencies: tables.package_dependencies.clone(),
            incompatible_options: tables.incompatible_options.clone(),
            required_combinations: tables.required_combinations.clone(),
            model_specific: tables.model_specific.get(name).cloned().unwrap_or_default(),
            regional: tables.regional.clone(),
        }
    }

    /// Engine by code.
    #[must_use]
    pub fn engine(&self, code: &str) -> Option<&Engine> {
        find(&self.data.engines, code)
    }

    /// Drivetrain by code.
    #[must_use]
    pub fn drivetrain(&self, code: &str) -> Option<&Drivetrain> {
        find(&self.data.drivetrains, code)
    }

    /// Exterior color by code.
    #[must_use]
    pub fn exterior_color(&self, code: &str) -> Option<&ExteriorColor> {
        find(&self.data.exterior_colors, code)
    }

    /// Wheel by code.
    #[must_use]
    pub fn wheel(&self, code: &str) -> Option<&Wheel> {
        find(&self.data.wheels, code)
    }

    /// Interior by code.
    #[must_use]
    pub fn interior(&self, code: &str) -> Option<&Interior> {
        find(&self.data.interiors, code)
    }

    /// Package by code.
    #[must_use]
    pub fn package(&self, code: &str) -> Option<&Package> {
        find(&self.data.packages, code)
    }

    /// Individual option by code.
    #[must_use]
    pub fn individual_option(&self, code: &str) -> Option<&IndividualOption> {
        find(&self.data.individual_options, code)
    }

    /// Whether a configuration key denotes a package.
    ///
    /// A key is a package flag when it follows the `_Package` naming
    /// convention, is a catalog package, or has package dependencies.
    #[must_use]
    pub fn is_package_flag(&self, key: &str) -> bool {
        key.ends_with("_Package")
            || self.package(key).is_some()
            || self.data.constraints.package_dependencies.contains_key(key)
    }
}

fn find<'a, T: CatalogItem>(items: &'a [T], code: &str) -> Option<&'a T> {
    items.iter().find(|item| item.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn get_model_known_and_unknown() {
        let catalog = catalog();
        let x1 = catalog.get_model("X1").unwrap();
        assert_eq!(x1.base_price, Money::dollars(37_500));
        assert_eq!(x1.engines, vec!["B48_2_0T"]);
        assert!(catalog.get_model("Z9").is_none());
    }

    #[test]
    fn default_description_for_models_without_one() {
        let catalog = catalog();
        assert!(catalog.get_model("X1").unwrap().description().contains("X1 Sports Activity"));
        assert_eq!(
            catalog.get_model("M5").unwrap().description(),
            "The BMW M5 delivers exceptional performance and luxury in its class."
        );
    }

    #[test]
    fn options_filtered_to_model() {
        let options = catalog().get_options_for_model("X3");
        let engines: Vec<&str> = options.engines.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(engines, vec!["B48_2_0T", "B58_3_0T"]);
        assert_eq!(options.drivetrains.len(), 1);
        assert!(options.packages.iter().all(|p| p.is_offered_on("X3")));
        assert!(!options.packages.iter().any(|p| p.code == "Executive_Package"));
        assert!(!options.exterior_colors.is_empty());
    }

    #[test]
    fn unknown_model_has_empty_options() {
        let options = catalog().get_options_for_model("Model T");
        assert!(options.is_empty());
        assert_eq!(options.constraints, ConstraintSet::default());
    }

    #[test]
    fn constraints_merge_model_specific_rules() {
        let catalog = catalog();
        let m3 = catalog.get_constraints("M3");
        assert_eq!(
            m3.model_specific.required_options,
            vec!["M_Sport_Package", "Performance_Tires"]
        );
        assert_eq!(m3.engine_drivetrain["N63_4_4T_V8"], vec!["xDrive"]);

        let unknown = catalog.get_constraints("Nope");
        assert!(unknown.model_specific.required_options.is_empty());
        assert!(!unknown.incompatible_options.is_empty());
    }

    #[test]
    fn series_lookup() {
        let catalog = catalog();
        let suvs = catalog.models_for_series("SUVs").unwrap();
        assert_eq!(suvs.len(), 9);
        let x1 = suvs.iter().find(|m| m.name == "X1").unwrap();
        assert!(x1.configurable);
        let x2 = suvs.iter().find(|m| m.name == "X2").unwrap();
        assert!(!x2.configurable);
        assert!(x2.base_price.is_none());
        assert!(catalog.models_for_series("Trucks").is_none());
    }

    #[test]
    fn package_flag_detection() {
        let catalog = catalog();
        assert!(catalog.is_package_flag("Premium_Package"));
        assert!(catalog.is_package_flag("Driver_Assistance_Professional"));
        assert!(catalog.is_package_flag("Bang_Olufsen_Audio"));
        assert!(catalog.is_package_flag("Made_Up_Package"));
        assert!(!catalog.is_package_flag("Sunroof"));
    }

    #[test]
    fn from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, EMBEDDED_CATALOG).unwrap();
        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.model_names().count(), 10);

        let missing = Catalog::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, CatalogError::ReadError { .. }));
    }
}
