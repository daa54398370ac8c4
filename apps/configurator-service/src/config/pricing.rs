//! Pricing policy configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Pricing policy: fees, tax and combo discount amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Destination fee added to every vehicle.
    #[serde(default = "default_destination_fee")]
    pub destination_fee: Money,
    /// Estimated sales tax rate applied to the MSRP.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    /// Base price used for models missing from the catalog.
    #[serde(default = "default_fallback_base_price")]
    pub fallback_base_price: Money,
    /// Combo discount amounts.
    #[serde(default)]
    pub discounts: DiscountConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            destination_fee: default_destination_fee(),
            tax_rate: default_tax_rate(),
            fallback_base_price: default_fallback_base_price(),
            discounts: DiscountConfig::default(),
        }
    }
}

/// Combo discount amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Premium + Technology packages.
    #[serde(default = "default_premium_technology")]
    pub premium_technology: Money,
    /// M Sport package with two or more other M packages.
    #[serde(default = "default_m_packages")]
    pub m_packages: Money,
    /// Three or more packages.
    #[serde(default = "default_multi_package")]
    pub multi_package: Money,
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            premium_technology: default_premium_technology(),
            m_packages: default_m_packages(),
            multi_package: default_multi_package(),
        }
    }
}

fn default_destination_fee() -> Money {
    Money::dollars(995)
}

fn default_tax_rate() -> Decimal {
    dec!(0.08)
}

fn default_fallback_base_price() -> Money {
    Money::dollars(50_000)
}

fn default_premium_technology() -> Money {
    Money::dollars(500)
}

fn default_m_packages() -> Money {
    Money::dollars(300)
}

fn default_multi_package() -> Money {
    Money::dollars(200)
}
