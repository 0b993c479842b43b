//! Order bookkeeping for listed products.

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::error::ValidationError;
use crate::domain::money::{round_money, Price};
use crate::domain::order::{FulfillmentStatus, NewOrder, Order, OrderFilter, OrderStatus};
use crate::domain::profitability::FeeSchedule;
use crate::error::{Error, Result};
use crate::port::outbound::store::{OrderStore, ProductStore};

/// An order as reported by the selling marketplace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    pub marketplace_order_id: String,
    pub supplier_order_id: Option<String>,
    pub product_id: i32,
    pub buyer_name: String,
    pub buyer_email: String,
    pub order_total: Price,
    pub order_status: Option<OrderStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    /// Overrides the derived profit when the caller already knows it.
    pub profit: Option<Price>,
}

impl OrderInput {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.marketplace_order_id.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "marketplaceOrderId",
            });
        }
        if self.buyer_name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "buyerName" });
        }
        let email = self.buyer_email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField { field: "buyerEmail" });
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(ValidationError::InvalidValue {
                    field: "buyerEmail",
                    reason: format!("'{email}' is not a valid email"),
                })
            }
        }
        if self.order_total <= Decimal::ZERO {
            return Err(ValidationError::InvalidValue {
                field: "orderTotal",
                reason: format!("must be positive, got {}", self.order_total),
            });
        }
        Ok(())
    }
}

/// Records and lists orders.
pub struct OrderService<O, P> {
    orders: O,
    products: P,
    fees: FeeSchedule,
}

impl<O: OrderStore, P: ProductStore> OrderService<O, P> {
    #[must_use]
    pub fn new(orders: O, products: P, fees: FeeSchedule) -> Self {
        Self {
            orders,
            products,
            fees,
        }
    }

    /// Record an order owned by `user_id`.
    ///
    /// Profit defaults to the sale total minus the product's cost and both
    /// marketplace fees.
    ///
    /// # Errors
    /// `Validation` for bad input, `NotFound` for an unknown product,
    /// `UniqueViolation` for a repeated marketplace order id.
    pub async fn record(&self, input: OrderInput, user_id: i32) -> Result<Order> {
        input.validate()?;

        let product = self
            .products
            .get(input.product_id)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "product",
                id: input.product_id.to_string(),
            })?;

        let profit = match input.profit {
            Some(profit) => round_money(profit),
            None => round_money(self.fees.net_profit(input.order_total, product.cost_price)?),
        };

        let order = self
            .orders
            .create(NewOrder {
                marketplace_order_id: input.marketplace_order_id.trim().to_string(),
                supplier_order_id: input.supplier_order_id,
                product_id: product.id,
                buyer_name: input.buyer_name.trim().to_string(),
                buyer_email: input.buyer_email.trim().to_string(),
                order_total: round_money(input.order_total),
                order_status: input.order_status.unwrap_or_default(),
                fulfillment_status: input.fulfillment_status.unwrap_or_default(),
                tracking_number: input.tracking_number,
                carrier: input.carrier,
                profit: Some(profit),
                user_id,
            })
            .await?;

        info!(
            order_id = %order.marketplace_order_id,
            product_id = order.product_id,
            profit = %profit,
            "Order recorded"
        );
        Ok(order)
    }

    /// Orders matching `filter`, newest first.
    ///
    /// # Errors
    /// Propagates store read failures.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        self.orders.find_all(filter).await
    }
}
