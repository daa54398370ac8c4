//! Price calculation.
//!
//! The calculator sums the model base price, selection deltas, packages and
//! individual options, subtracts combo discounts, then adds the destination
//! fee and estimated tax. All arithmetic is exact decimal arithmetic.

mod discounts;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::models::configuration::{DRIVETRAIN, ENGINE, EXTERIOR_COLOR, INTERIOR, WHEELS};
use crate::models::{
    CatalogItem, Configuration, LineCategory, LineItem, Money, PriceBreakdown,
};
use crate::observability::metrics;

pub use discounts::combo_discounts;

/// Computes itemized price breakdowns.
#[derive(Debug, Clone)]
pub struct PriceCalculator {
    catalog: Arc<Catalog>,
    policy: PricingConfig,
}

impl PriceCalculator {
    /// Create a calculator with the given pricing policy.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, policy: PricingConfig) -> Self {
        Self { catalog, policy }
    }

    /// Pricing policy in use.
    #[must_use]
    pub const fn policy(&self) -> &PricingConfig {
        &self.policy
    }

    /// Price a configuration for a model.
    ///
    /// Unknown models are priced from the fallback base price. Codes missing
    /// from the catalog contribute nothing.
    #[must_use]
    pub fn calculate_price(&self, model: &str, configuration: &Configuration) -> PriceBreakdown {
        let base_price = self
            .catalog
            .get_model(model)
            .map_or(self.policy.fallback_base_price, |m| m.base_price);

        let mut itemized = Vec::new();

        let engine_upgrade = selection_delta(
            configuration.selection(ENGINE).and_then(|c| self.catalog.engine(c)),
            LineCategory::Engine,
            None,
            &mut itemized,
        );
        let drivetrain_upgrade = selection_delta(
            configuration
                .selection(DRIVETRAIN)
                .and_then(|c| self.catalog.drivetrain(c)),
            LineCategory::Drivetrain,
            None,
            &mut itemized,
        );
        let color = selection_delta(
            configuration
                .selection(EXTERIOR_COLOR)
                .and_then(|c| self.catalog.exterior_color(c)),
            LineCategory::Exterior,
            Some(" Paint"),
            &mut itemized,
        );
        let wheels = selection_delta(
            configuration.selection(WHEELS).and_then(|c| self.catalog.wheel(c)),
            LineCategory::Exterior,
            None,
            &mut itemized,
        );
        let interior_options = selection_delta(
            configuration
                .selection(INTERIOR)
                .and_then(|c| self.catalog.interior(c)),
            LineCategory::Interior,
            None,
            &mut itemized,
        );

        let mut packages = Money::ZERO;
        let mut package_codes = Vec::new();
        let mut individual_options = Money::ZERO;

        for key in configuration.flags() {
            if let Some(package) = self.catalog.package(key) {
                packages += package.price;
                package_codes.push(package.code.as_str());
                itemized.push(line(package, LineCategory::Package, None));
            } else if let Some(option) = self.catalog.individual_option(key)
                && !self.catalog.is_package_flag(key)
            {
                individual_options += option.price;
                itemized.push(line(option, LineCategory::Option, None));
            }
        }

        let discounts = combo_discounts(&package_codes, &self.policy.discounts);
        let package_discount: Money = discounts.iter().map(|d| d.amount).sum();

        let exterior_options = color + wheels;
        let subtotal = base_price
            + engine_upgrade
            + drivetrain_upgrade
            + exterior_options
            + interior_options
            + packages
            + individual_options
            - package_discount;
        let destination_fee = self.policy.destination_fee;
        let total_msrp = subtotal + destination_fee;
        let estimated_tax = (total_msrp * self.policy.tax_rate).round();
        let estimated_total = total_msrp + estimated_tax;

        metrics::record_price_calculation();
        tracing::debug!(
            model = %model,
            lines = itemized.len(),
            discount = %package_discount,
            total_msrp = %total_msrp,
            "Price calculated"
        );

        PriceBreakdown {
            model: model.to_string(),
            base_price,
            engine_upgrade,
            drivetrain_upgrade,
            exterior_options,
            interior_options,
            packages,
            individual_options,
            itemized,
            discounts,
            package_discount,
            subtotal,
            destination_fee,
            total_msrp,
            estimated_tax,
            estimated_total,
        }
    }
}

/// Delta of a selected catalog entry; itemized only when non-zero.
fn selection_delta<T: CatalogItem>(
    item: Option<&T>,
    category: LineCategory,
    suffix: Option<&str>,
    itemized: &mut Vec<LineItem>,
) -> Money {
    let Some(item) = item else {
        return Money::ZERO;
    };
    let price = item.price();
    if !price.is_zero() {
        itemized.push(line(item, category, suffix));
    }
    price
}

fn line<T: CatalogItem>(item: &T, category: LineCategory, suffix: Option<&str>) -> LineItem {
    LineItem {
        category,
        item: format!("{}{}", item.name(), suffix.unwrap_or_default()),
        code: item.code().to_string(),
        price: item.price(),
    }
}
