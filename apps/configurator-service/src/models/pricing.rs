//! Price breakdown types.

use serde::{Deserialize, Serialize};

use super::Money;

/// Category of an itemized price line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineCategory {
    /// Engine upgrade.
    Engine,
    /// Drivetrain upgrade.
    Drivetrain,
    /// Paint and wheels.
    Exterior,
    /// Upholstery.
    Interior,
    /// Package.
    Package,
    /// Individual option.
    Option,
}

/// One itemized line of a price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line category.
    pub category: LineCategory,
    /// Display name.
    pub item: String,
    /// Catalog code.
    pub code: String,
    /// Price.
    pub price: Money,
}

/// Combo discounts granted for package combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Premium and Technology packages together.
    PremiumTechnology,
    /// M Sport package with two or more other M packages.
    MPackages,
    /// Three or more packages.
    MultiPackage,
}

/// One applied combo discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLine {
    /// Discount kind.
    pub kind: DiscountKind,
    /// Display text.
    pub description: String,
    /// Positive amount subtracted from the subtotal.
    pub amount: Money,
}

/// Full price breakdown of one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Model the breakdown was computed for.
    pub model: String,
    /// Model base price (fallback base price for unknown models).
    pub base_price: Money,
    /// Engine delta.
    pub engine_upgrade: Money,
    /// Drivetrain delta.
    pub drivetrain_upgrade: Money,
    /// Paint and wheel deltas.
    pub exterior_options: Money,
    /// Interior delta.
    pub interior_options: Money,
    /// Sum of package prices.
    pub packages: Money,
    /// Sum of individual option prices.
    pub individual_options: Money,
    /// Itemized lines with non-zero selection deltas, packages and options.
    pub itemized: Vec<LineItem>,
    /// Applied combo discounts.
    pub discounts: Vec<DiscountLine>,
    /// Total of all discounts.
    pub package_discount: Money,
    /// Base plus all deltas minus discounts.
    pub subtotal: Money,
    /// Destination fee.
    pub destination_fee: Money,
    /// Subtotal plus destination fee.
    pub total_msrp: Money,
    /// Estimated tax on the MSRP, rounded to cents.
    pub estimated_tax: Money,
    /// MSRP plus tax.
    pub estimated_total: Money,
}

impl PriceBreakdown {
    /// Sum of every component before discounts and fees.
    #[must_use]
    pub fn gross(&self) -> Money {
        self.base_price
            + self.engine_upgrade
            + self.drivetrain_upgrade
            + self.exterior_options
            + self.interior_options
            + self.packages
            + self.individual_options
    }
}
