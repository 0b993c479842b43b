//! Worker result documents in the shapes real workers print.

use serde_json::{json, Value};

/// Listing result using the selling marketplace's field names.
pub fn ebay_listing(listing_id: &str) -> Value {
    json!({
        "success": true,
        "ebayListingId": listing_id,
        "title": "Adjustable LED desk lamp",
        "amazonPrice": 20.0,
        "ebayPrice": 30.0,
        "profit": 5.83,
        "category": "home"
    })
}

/// Listing result using the neutral field names.
pub fn listing(listing_id: &str, cost: &str, list: &str, profit: &str) -> Value {
    json!({
        "listingId": listing_id,
        "costPrice": cost,
        "listPrice": list,
        "netProfit": profit
    })
}

pub fn price_check(price: f64) -> Value {
    json!({
        "asin": "B07XJ8C8F5",
        "title": "Adjustable LED desk lamp",
        "price": price,
        "available": true
    })
}

pub fn search_results() -> Value {
    json!([
        { "asin": "B07XJ8C8F5", "title": "Adjustable LED desk lamp", "price": 20.0, "estimatedProfit": 5.83 },
        { "asin": "B08L5TNJHG", "title": "Monitor riser", "price": 34.5, "estimatedProfit": 7.1 }
    ])
}
