//! Pricing and search policy configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::arbitrage::ArbitrageSettings;
use crate::domain::profitability::FeeSchedule;

/// Markup and fee schedule used for profitability checks and order profit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PricingConfig {
    /// Markup applied when checking profitability (15 = 15%).
    #[serde(default = "default_markup_percent")]
    pub markup_percent: Decimal,
    #[serde(default = "default_marketplace_fee_rate")]
    pub marketplace_fee_rate: Decimal,
    #[serde(default = "default_payment_fee_rate")]
    pub payment_fee_rate: Decimal,
    #[serde(default = "default_payment_fee_fixed")]
    pub payment_fee_fixed: Decimal,
}

fn default_markup_percent() -> Decimal {
    dec!(15)
}

fn default_marketplace_fee_rate() -> Decimal {
    dec!(0.10)
}

fn default_payment_fee_rate() -> Decimal {
    dec!(0.029)
}

fn default_payment_fee_fixed() -> Decimal {
    dec!(0.30)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            markup_percent: default_markup_percent(),
            marketplace_fee_rate: default_marketplace_fee_rate(),
            payment_fee_rate: default_payment_fee_rate(),
            payment_fee_fixed: default_payment_fee_fixed(),
        }
    }
}

impl PricingConfig {
    #[must_use]
    pub const fn fees(&self) -> FeeSchedule {
        FeeSchedule {
            marketplace_fee_rate: self.marketplace_fee_rate,
            payment_fee_rate: self.payment_fee_rate,
            payment_fee_fixed: self.payment_fee_fixed,
        }
    }
}

/// Defaults for search requests that omit their thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_profit")]
    pub min_profit: Decimal,
    #[serde(default = "default_max_price")]
    pub max_price: Decimal,
}

fn default_min_profit() -> Decimal {
    dec!(5)
}

fn default_max_price() -> Decimal {
    dec!(100)
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_profit: default_min_profit(),
            max_price: default_max_price(),
        }
    }
}

/// Combine pricing and search policy into the orchestrator's settings.
#[must_use]
pub fn arbitrage_settings(
    pricing: &PricingConfig,
    search: &SearchConfig,
    worker_timeout: Duration,
) -> ArbitrageSettings {
    ArbitrageSettings {
        fees: pricing.fees(),
        markup_percent: pricing.markup_percent,
        default_min_profit: search.min_profit,
        default_max_price: search.max_price,
        worker_timeout,
    }
}
