//! Products sourced on one marketplace and relisted on another.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Price;

/// Maximum length of a listing title.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of a listing description.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Listing lifecycle of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Pending,
    Listed,
    Sold,
    Error,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Listed => "listed",
            Self::Sold => "sold",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "listed" => Ok(Self::Listed),
            "sold" => Ok(Self::Sold),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown product status '{other}'")),
        }
    }
}

/// A persisted product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub source_id: String,
    pub listing_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cost_price: Price,
    pub list_price: Option<Price>,
    pub profit: Option<Price>,
    pub roi: Option<Decimal>,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub source_id: String,
    pub listing_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cost_price: Price,
    pub list_price: Option<Price>,
    pub profit: Option<Price>,
    pub roi: Option<Decimal>,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    pub user_id: i32,
}

/// Selection criteria for product queries. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub user_id: Option<i32>,
    pub status: Option<ProductStatus>,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.user_id.map_or(true, |id| product.user_id == id)
            && self.status.map_or(true, |s| product.status == s)
    }
}
