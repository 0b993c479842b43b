//! Cross-record rollups over the product collection.
//!
//! [`AggregateStats::from_products`] is a pure single pass over a snapshot of
//! products; it never fails and zero-fills an empty collection.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{round_money, Price};
use super::product::Product;

/// Label of the bucket for products without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Number of listings reported in [`AggregateStats::recent_listings`].
pub const RECENT_LISTINGS: usize = 5;

/// Money totals across all products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub total_profit: Price,
    pub avg_profit: Price,
    pub total_revenue: Price,
    pub total_cost: Price,
}

impl Default for Financials {
    fn default() -> Self {
        Self {
            total_profit: round_money(Decimal::ZERO),
            avg_profit: round_money(Decimal::ZERO),
            total_revenue: round_money(Decimal::ZERO),
            total_cost: round_money(Decimal::ZERO),
        }
    }
}

/// Profit rollup for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfit {
    pub category: String,
    /// Set on the synthesized bucket for products without a category, so it
    /// stays apart from a category that happens to share its label.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub uncategorized: bool,
    pub total_profit: Price,
    pub count: u64,
}

/// Dashboard statistics, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_products: u64,
    pub financials: Financials,
    /// Descending total profit, ties by category name ascending.
    pub profit_by_category: Vec<CategoryProfit>,
    /// Newest first.
    pub recent_listings: Vec<Product>,
}

#[derive(Default)]
struct Bucket {
    profit: Decimal,
    count: u64,
}

impl AggregateStats {
    /// Roll up a snapshot of products.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut total_profit = Decimal::ZERO;
        let mut total_revenue = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        let mut profit_rows: u64 = 0;
        let mut buckets: HashMap<Option<&str>, Bucket> = HashMap::new();

        for product in products {
            if let Some(profit) = product.profit {
                total_profit += profit;
                profit_rows += 1;
            }
            total_revenue += product.list_price.unwrap_or_default();
            total_cost += product.cost_price;

            let bucket = buckets.entry(product.category.as_deref()).or_default();
            bucket.profit += product.profit.unwrap_or_default();
            bucket.count += 1;
        }

        let avg_profit = if profit_rows == 0 {
            Decimal::ZERO
        } else {
            total_profit / Decimal::from(profit_rows)
        };

        let mut profit_by_category: Vec<CategoryProfit> = buckets
            .into_iter()
            .map(|(category, bucket)| CategoryProfit {
                category: category.unwrap_or(UNCATEGORIZED).to_string(),
                uncategorized: category.is_none(),
                total_profit: round_money(bucket.profit),
                count: bucket.count,
            })
            .collect();
        profit_by_category.sort_by(|a, b| {
            b.total_profit
                .cmp(&a.total_profit)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.uncategorized.cmp(&b.uncategorized))
        });

        let mut recent: Vec<&Product> = products.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        let recent_listings = recent
            .into_iter()
            .take(RECENT_LISTINGS)
            .cloned()
            .collect();

        Self {
            total_products: products.len() as u64,
            financials: Financials {
                total_profit: round_money(total_profit),
                avg_profit: round_money(avg_profit),
                total_revenue: round_money(total_revenue),
                total_cost: round_money(total_cost),
            },
            profit_by_category,
            recent_listings,
        }
    }
}
