//! Builders for domain records used across tests.
//!
//! Defaults describe a desk lamp bought for 20.00 and listed at 30.00, so
//! tests only spell out the fields they assert on.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::order::{FulfillmentStatus, NewOrder, OrderStatus};
use crate::domain::product::{NewProduct, Product, ProductStatus};

/// A fixed instant so ordering assertions do not depend on the clock.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// An unsaved listed product owned by user 1.
pub fn new_product(source_id: &str) -> NewProduct {
    NewProduct {
        source_id: source_id.to_string(),
        listing_id: Some(format!("L-{source_id}")),
        title: "Desk lamp".to_string(),
        description: None,
        category: Some("home".to_string()),
        cost_price: dec!(20.00),
        list_price: Some(dec!(30.00)),
        profit: Some(dec!(5.83)),
        roi: Some(dec!(29.15)),
        status: ProductStatus::Listed,
        image_url: None,
        user_id: 1,
    }
}

/// A stored product created `minutes` after [`epoch`].
pub fn product(id: i32, source_id: &str, minutes: i64) -> Product {
    let at = epoch() + Duration::minutes(minutes);
    let new = new_product(source_id);
    Product {
        id,
        source_id: new.source_id,
        listing_id: new.listing_id,
        title: new.title,
        description: new.description,
        category: new.category,
        cost_price: new.cost_price,
        list_price: new.list_price,
        profit: new.profit,
        roi: new.roi,
        status: new.status,
        image_url: new.image_url,
        user_id: new.user_id,
        created_at: at,
        updated_at: at,
    }
}

/// A stored product with the given category and profit.
pub fn product_with(
    id: i32,
    category: Option<&str>,
    profit: Option<Decimal>,
    minutes: i64,
) -> Product {
    Product {
        category: category.map(str::to_string),
        profit,
        ..product(id, &format!("B{id:04}"), minutes)
    }
}

/// An unsaved order for `product_id`, placed by a test buyer.
pub fn new_order(marketplace_order_id: &str, product_id: i32) -> NewOrder {
    NewOrder {
        marketplace_order_id: marketplace_order_id.to_string(),
        supplier_order_id: None,
        product_id,
        buyer_name: "Ada Buyer".to_string(),
        buyer_email: "ada@example.com".to_string(),
        order_total: dec!(30.00),
        order_status: OrderStatus::Received,
        fulfillment_status: FulfillmentStatus::Pending,
        tracking_number: None,
        carrier: None,
        profit: Some(dec!(5.83)),
        user_id: 1,
    }
}
