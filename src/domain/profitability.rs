//! Resale profitability: marketplace fees, net profit and ROI.
//!
//! The arithmetic chain is fixed:
//!
//! ```text
//! list_price   = cost * (1 + markup / 100)
//! marketplace  = list_price * marketplace_fee_rate
//! payment      = list_price * payment_fee_rate + payment_fee_fixed
//! net_profit   = list_price - cost - marketplace - payment
//! roi          = net_profit / cost * 100
//! ```
//!
//! Every step runs on unrounded values; rounding to cents happens only when
//! the figures are assembled.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{round_money, Price};

/// Fee policy applied on the selling marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Final value fee charged by the marketplace (0.10 = 10%).
    pub marketplace_fee_rate: Decimal,
    /// Percentage part of the payment processing fee (0.029 = 2.9%).
    pub payment_fee_rate: Decimal,
    /// Fixed part of the payment processing fee per sale.
    pub payment_fee_fixed: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            marketplace_fee_rate: dec!(0.10),
            payment_fee_rate: dec!(0.029),
            payment_fee_fixed: dec!(0.30),
        }
    }
}

impl FeeSchedule {
    /// Marketplace fee on a sale price, unrounded.
    ///
    /// # Errors
    /// [`DomainError::Overflow`] when the fee does not fit in a decimal.
    pub fn marketplace_fee(&self, sale_price: Price) -> Result<Price, DomainError> {
        sale_price
            .checked_mul(self.marketplace_fee_rate)
            .ok_or(DomainError::Overflow { step: "marketplace fee" })
    }

    /// Payment processing fee on a sale price, unrounded.
    ///
    /// # Errors
    /// [`DomainError::Overflow`] when the fee does not fit in a decimal.
    pub fn payment_fee(&self, sale_price: Price) -> Result<Price, DomainError> {
        sale_price
            .checked_mul(self.payment_fee_rate)
            .and_then(|fee| fee.checked_add(self.payment_fee_fixed))
            .ok_or(DomainError::Overflow { step: "payment fee" })
    }

    /// Net profit after both fees, unrounded.
    ///
    /// # Errors
    /// [`DomainError::Overflow`] when any step does not fit in a decimal.
    pub fn net_profit(&self, sale_price: Price, cost_price: Price) -> Result<Price, DomainError> {
        let marketplace_fee = self.marketplace_fee(sale_price)?;
        let payment_fee = self.payment_fee(sale_price)?;
        sale_price
            .checked_sub(cost_price)
            .and_then(|p| p.checked_sub(marketplace_fee))
            .and_then(|p| p.checked_sub(payment_fee))
            .ok_or(DomainError::Overflow { step: "net profit" })
    }
}

/// Profitability of reselling one item at a markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityFigures {
    /// Echoed exactly as supplied.
    pub cost_price: Price,
    pub list_price: Price,
    pub marketplace_fee: Price,
    pub payment_processing_fee: Price,
    pub net_profit: Price,
    #[serde(rename = "returnOnInvestmentPercent")]
    pub roi_percent: Decimal,
}

/// Compute profitability for `cost_price` listed at `markup_percent` above cost.
///
/// # Errors
/// Returns [`DomainError::NonPositiveCost`] when `cost_price <= 0` and
/// [`DomainError::Overflow`] when the figures do not fit in a decimal.
pub fn compute(
    cost_price: Price,
    markup_percent: Decimal,
    fees: &FeeSchedule,
) -> Result<ProfitabilityFigures, DomainError> {
    if cost_price <= Decimal::ZERO {
        return Err(DomainError::NonPositiveCost { cost: cost_price });
    }

    let list_price = markup_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|m| Decimal::ONE.checked_add(m))
        .and_then(|factor| cost_price.checked_mul(factor))
        .ok_or(DomainError::Overflow { step: "list price" })?;
    let marketplace_fee = fees.marketplace_fee(list_price)?;
    let payment_fee = fees.payment_fee(list_price)?;
    let net_profit = fees.net_profit(list_price, cost_price)?;

    Ok(ProfitabilityFigures {
        cost_price,
        list_price: round_money(list_price),
        marketplace_fee: round_money(marketplace_fee),
        payment_processing_fee: round_money(payment_fee),
        net_profit: round_money(net_profit),
        roi_percent: roi_percent(net_profit, cost_price)?,
    })
}

/// Return on investment as a percentage rounded to two places.
///
/// # Errors
/// [`DomainError::NonPositiveCost`] for a cost that is not positive and
/// [`DomainError::Overflow`] when the ratio does not fit in a decimal.
pub fn roi_percent(net_profit: Price, cost_price: Price) -> Result<Decimal, DomainError> {
    if cost_price <= Decimal::ZERO {
        return Err(DomainError::NonPositiveCost { cost: cost_price });
    }
    net_profit
        .checked_div(cost_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_money)
        .ok_or(DomainError::Overflow { step: "return on investment" })
}
