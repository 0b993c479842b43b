//! Typed views over worker result documents.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::profitability::roi_percent;
use crate::domain::worker::WorkerFailure;

/// Fields a listing worker reports for a created listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListingPayload {
    #[serde(alias = "ebayListingId")]
    pub listing_id: String,
    #[serde(alias = "ebayPrice")]
    pub list_price: Decimal,
    #[serde(alias = "amazonPrice")]
    pub cost_price: Decimal,
    #[serde(alias = "profit")]
    pub net_profit: Decimal,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Derived from `net_profit` over `cost_price`.
    #[serde(skip)]
    pub roi: Decimal,
}

/// Live source price reported by a price-check worker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PricePayload {
    #[serde(alias = "costPrice")]
    pub price: Decimal,
}

pub(super) fn candidates(payload: Value) -> Result<Vec<Value>, WorkerFailure> {
    match payload {
        Value::Array(items) => Ok(items),
        other => Err(WorkerFailure::malformed(
            "search result is not a list of candidates",
            &other,
        )),
    }
}

pub(super) fn listing(payload: &Value) -> Result<ListingPayload, WorkerFailure> {
    let mut listing: ListingPayload = serde_json::from_value(payload.clone())
        .map_err(|e| WorkerFailure::malformed(format!("listing result: {e}"), payload))?;
    if listing.listing_id.trim().is_empty() {
        return Err(WorkerFailure::malformed("listing result has an empty listing id", payload));
    }
    if listing.cost_price <= Decimal::ZERO {
        return Err(WorkerFailure::malformed(
            format!("listing result has non-positive cost {}", listing.cost_price),
            payload,
        ));
    }
    listing.roi = roi_percent(listing.net_profit, listing.cost_price)
        .map_err(|e| WorkerFailure::malformed(format!("listing result: {e}"), payload))?;
    Ok(listing)
}

pub(super) fn price(payload: &Value) -> Result<Decimal, WorkerFailure> {
    serde_json::from_value::<PricePayload>(payload.clone())
        .map(|p| p.price)
        .map_err(|e| WorkerFailure::malformed(format!("price result: {e}"), payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn listing_accepts_source_marketplace_names() {
        let payload = json!({
            "ebayListingId": "110553",
            "title": "Desk lamp",
            "amazonPrice": 20.0,
            "ebayPrice": "27.99",
            "profit": 3.51
        });
        let listing = listing(&payload).unwrap();

        assert_eq!(listing.listing_id, "110553");
        assert_eq!(listing.cost_price, dec!(20));
        assert_eq!(listing.list_price, dec!(27.99));
        assert_eq!(listing.net_profit, dec!(3.51));
        assert_eq!(listing.roi, dec!(17.55));
    }

    #[test]
    fn listing_with_unrepresentable_roi_is_malformed() {
        let payload = json!({
            "listingId": "1",
            "listPrice": "10",
            "costPrice": "0.0000000000000000000000001",
            "netProfit": "79228162514264337593543950335"
        });
        let err = listing(&payload).unwrap_err();

        assert_eq!(err.classification(), "malformed_output");
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn listing_missing_field_is_malformed() {
        let payload = json!({ "listingId": "1", "listPrice": 10, "costPrice": 5 });
        let err = listing(&payload).unwrap_err();

        assert_eq!(err.classification(), "malformed_output");
        assert!(err.to_string().contains("netProfit"));
    }

    #[test]
    fn search_payload_must_be_a_list() {
        assert_eq!(candidates(json!([{"asin": "B1"}])).unwrap().len(), 1);
        assert!(candidates(json!({"asin": "B1"})).is_err());
    }

    #[test]
    fn price_reads_either_name() {
        assert_eq!(price(&json!({"price": 12.5})).unwrap(), dec!(12.5));
        assert_eq!(price(&json!({"costPrice": "8"})).unwrap(), dec!(8));
        assert!(price(&json!({"cost": 8})).is_err());
    }
}
