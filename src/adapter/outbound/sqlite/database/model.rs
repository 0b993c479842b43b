//! Database model types for Diesel ORM.
//!
//! Money and percentages are stored as decimal strings so that values read
//! back compare equal to what was written. Timestamps are RFC 3339 text.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{orders, products};
use crate::error::{Error, Result};

/// Database row for a product (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub source_id: String,
    pub listing_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cost_price: String,
    pub list_price: Option<String>,
    pub profit: Option<String>,
    pub roi: Option<String>,
    pub status: String,
    pub image_url: Option<String>,
    pub user_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a product (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i32,
    pub source_id: String,
    pub listing_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cost_price: String,
    pub list_price: Option<String>,
    pub profit: Option<String>,
    pub roi: Option<String>,
    pub status: String,
    pub image_url: Option<String>,
    pub user_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for an order (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub marketplace_order_id: String,
    pub supplier_order_id: Option<String>,
    pub product_id: i32,
    pub buyer_name: String,
    pub buyer_email: String,
    pub order_total: String,
    pub order_status: String,
    pub fulfillment_status: String,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub profit: Option<String>,
    pub user_id: i32,
    pub created_at: String,
}

/// Database row for an order (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: i32,
    pub marketplace_order_id: String,
    pub supplier_order_id: Option<String>,
    pub product_id: i32,
    pub buyer_name: String,
    pub buyer_email: String,
    pub order_total: String,
    pub order_status: String,
    pub fulfillment_status: String,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub profit: Option<String>,
    pub user_id: i32,
    pub created_at: String,
}

/// Result row for `SELECT last_insert_rowid()`.
#[derive(QueryableByName, Debug)]
pub struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    pub id: i32,
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("timestamp '{value}': {e}")))
}

pub fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| Error::Parse(format!("decimal '{value}': {e}")))
}

pub fn parse_optional_decimal(value: Option<&str>) -> Result<Option<Decimal>> {
    value.map(parse_decimal).transpose()
}
