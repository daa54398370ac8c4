//! Catalog document parsing and referential integrity checks.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::models::{CatalogData, CatalogItem};

/// Default catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../../catalog/bmw.yaml");

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("Failed to read catalog file '{path}': {source}")]
    ReadError {
        /// Path to the catalog file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse the catalog YAML.
    #[error("Failed to parse catalog YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Two entries of one table share a code.
    #[error("Duplicate {table} code '{code}'")]
    DuplicateCode {
        /// Table name.
        table: &'static str,
        /// The repeated code.
        code: String,
    },

    /// An entry references a code that does not exist.
    #[error("{owner} references unknown {kind} '{code}'")]
    UnknownReference {
        /// Referencing entry.
        owner: String,
        /// Kind of the referenced entry.
        kind: &'static str,
        /// The missing code.
        code: String,
    },

    /// An engine has no entry in the engine/drivetrain table.
    #[error("Engine '{0}' has no drivetrain compatibility rule")]
    MissingDrivetrainRule(String),

    /// A rule or package lists an empty code.
    #[error("{0} contains an empty option code")]
    EmptyCode(String),
}

/// Read and check a catalog file.
pub fn load_file(path: &Path) -> Result<CatalogData, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&contents)
}

/// Parse and check a catalog document.
pub fn parse(yaml: &str) -> Result<CatalogData, CatalogError> {
    let data: CatalogData = serde_yaml_bw::from_str(yaml)?;
    check_integrity(&data)?;
    Ok(data)
}

/// Verify referential integrity of a parsed catalog.
pub fn check_integrity(data: &CatalogData) -> Result<(), CatalogError> {
    ensure_unique("model", data.models.iter().map(|m| m.code.as_str()))?;
    ensure_unique("engine", data.engines.iter().map(CatalogItem::code))?;
    ensure_unique("drivetrain", data.drivetrains.iter().map(CatalogItem::code))?;
    ensure_unique("exterior color", data.exterior_colors.iter().map(CatalogItem::code))?;
    ensure_unique("wheel", data.wheels.iter().map(CatalogItem::code))?;
    ensure_unique("interior", data.interiors.iter().map(CatalogItem::code))?;
    ensure_unique("package", data.packages.iter().map(CatalogItem::code))?;
    ensure_unique(
        "individual option",
        data.individual_options.iter().map(CatalogItem::code),
    )?;

    let engines: HashSet<&str> = data.engines.iter().map(CatalogItem::code).collect();
    let drivetrains: HashSet<&str> = data.drivetrains.iter().map(CatalogItem::code).collect();

    for model in &data.models {
        for engine in &model.engines {
            if !engines.contains(engine.as_str()) {
                return Err(unknown_ref(format!("Model {}", model.code), "engine", engine));
            }
        }
        for drivetrain in &model.drivetrains {
            if !drivetrains.contains(drivetrain.as_str()) {
                return Err(unknown_ref(
                    format!("Model {}", model.code),
                    "drivetrain",
                    drivetrain,
                ));
            }
        }
    }

    let rules = &data.constraints.engine_drivetrain;
    for engine in &data.engines {
        if !rules.contains_key(&engine.code) {
            return Err(CatalogError::MissingDrivetrainRule(engine.code.clone()));
        }
    }
    for (engine, allowed) in rules {
        for drivetrain in allowed {
            if !drivetrains.contains(drivetrain.as_str()) {
                return Err(unknown_ref(
                    format!("Drivetrain rule for {engine}"),
                    "drivetrain",
                    drivetrain,
                ));
            }
        }
    }

    for package in &data.packages {
        let owner = format!("Package {}", package.code);
        ensure_non_empty(&owner, package.requires.iter().chain(&package.conflicts_with))?;
    }
    for (package, requires) in &data.constraints.package_dependencies {
        ensure_non_empty(&format!("Dependencies of {package}"), requires)?;
    }
    for group in &data.constraints.incompatible_options {
        ensure_non_empty("Exclusion group", &group.options)?;
    }
    for rule in &data.constraints.required_combinations {
        ensure_non_empty(&format!("Required combination for {}", rule.base), &rule.requires)?;
    }

    Ok(())
}

fn ensure_unique<'a>(
    table: &'static str,
    codes: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for code in codes {
        if !seen.insert(code) {
            return Err(CatalogError::DuplicateCode {
                table,
                code: code.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_non_empty<'a>(
    owner: &str,
    codes: impl IntoIterator<Item = &'a String>,
) -> Result<(), CatalogError> {
    if codes.into_iter().any(|c| c.trim().is_empty()) {
        return Err(CatalogError::EmptyCode(owner.to_string()));
    }
    Ok(())
}

fn unknown_ref(owner: String, kind: &'static str, code: &str) -> CatalogError {
    CatalogError::UnknownReference {
        owner,
        kind,
        code: code.to_string(),
    }
}
