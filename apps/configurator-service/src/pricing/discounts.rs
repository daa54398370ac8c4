//! Package combination discounts.

use crate::config::DiscountConfig;
use crate::models::{DiscountKind, DiscountLine};

/// Combo discounts for a set of selected catalog package codes.
///
/// Discounts are additive and evaluated once over the final package set.
#[must_use]
pub fn combo_discounts(packages: &[&str], amounts: &DiscountConfig) -> Vec<DiscountLine> {
    let has = |code: &str| packages.contains(&code);
    let mut lines = Vec::new();

    if has("Premium_Package") && has("Technology_Package") {
        lines.push(DiscountLine {
            kind: DiscountKind::PremiumTechnology,
            description: "Premium + Technology package combo".to_string(),
            amount: amounts.premium_technology,
        });
    }

    let other_m_packages = packages
        .iter()
        .filter(|p| p.starts_with("M_") && **p != "M_Sport_Package")
        .count();
    if has("M_Sport_Package") && other_m_packages >= 2 {
        lines.push(DiscountLine {
            kind: DiscountKind::MPackages,
            description: "M package bundle".to_string(),
            amount: amounts.m_packages,
        });
    }

    if packages.len() >= 3 {
        lines.push(DiscountLine {
            kind: DiscountKind::MultiPackage,
            description: "Multi-package discount".to_string(),
            amount: amounts.multi_package,
        });
    }

    lines
}
