//! Deterministic advisory suggestions.
//!
//! Advisories never affect validity; they are appended after rule evaluation.

use crate::models::configuration::{EXTERIOR_COLOR, INTERIOR};
use crate::models::{Advisory, AdvisoryKind, Configuration};

const PERFORMANCE_SEDANS: [&str; 2] = ["3 Series", "5 Series"];
const FAMILY_SUVS: [&str; 3] = ["X1", "X3", "X5"];

/// Advisories for a configuration of the given model.
#[must_use]
pub fn advisories(model: &str, configuration: &Configuration) -> Vec<Advisory> {
    let mut out = Vec::new();

    if configuration.is_truthy("Premium_Package") && !configuration.is_truthy("Technology_Package")
    {
        out.push(advisory(
            AdvisoryKind::PackageCombo,
            "Many customers add Technology Package with Premium Package for enhanced connectivity",
            "Complete luxury and technology experience",
        ));
    }

    if PERFORMANCE_SEDANS.contains(&model) && !configuration.is_truthy("M_Sport_Package") {
        out.push(advisory(
            AdvisoryKind::PerformanceEnhancement,
            "Consider M Sport Package for enhanced driving dynamics and appearance",
            "Sportier driving experience and resale value",
        ));
    }

    if FAMILY_SUVS.contains(&model) && !configuration.is_truthy("Driver_Assistance_Package") {
        out.push(advisory(
            AdvisoryKind::Safety,
            "Driver Assistance Package adds important safety features for family vehicles",
            "Enhanced safety and peace of mind",
        ));
    }

    if !configuration.is_truthy("Cold_Weather_Package") {
        out.push(advisory(
            AdvisoryKind::Seasonal,
            "Cold Weather Package recommended for northern climates",
            "Enhanced comfort during winter months",
        ));
    }

    let black_interior = configuration
        .selection(INTERIOR)
        .is_some_and(|code| code.ends_with("_Black"));
    if configuration.selection(EXTERIOR_COLOR) == Some("Alpine_White") && black_interior {
        out.push(advisory(
            AdvisoryKind::Styling,
            "Alpine White over a black interior is a classic high-contrast pairing",
            "Timeless look with strong resale appeal",
        ));
    }

    out
}

fn advisory(kind: AdvisoryKind, message: &str, benefit: &str) -> Advisory {
    Advisory {
        kind,
        message: message.to_string(),
        benefit: benefit.to_string(),
    }
}
