//! Handlers for `orders record` and `orders list`.

use serde_json::json;
use tabled::Tabled;

use super::command::{OrderListArgs, OrderRecordArgs};
use super::output;
use crate::application::order::OrderInput;
use crate::domain::order::{Order, OrderFilter};
use crate::error::Result;
use crate::infrastructure::bootstrap::Desk;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    order_id: String,
    #[tabled(rename = "Product")]
    product_id: i32,
    #[tabled(rename = "Buyer")]
    buyer: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Fulfillment")]
    fulfillment: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.marketplace_order_id.clone(),
            product_id: order.product_id,
            buyer: order.buyer_name.clone(),
            total: format!("{:.2}", order.order_total),
            profit: order
                .profit
                .map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
            status: order.order_status.to_string(),
            fulfillment: order.fulfillment_status.to_string(),
        }
    }
}

/// Execute `flipdesk orders record`.
pub async fn record(desk: &Desk, args: OrderRecordArgs) -> Result<()> {
    let user_id = args.user.unwrap_or(desk.user_id);
    let input = OrderInput {
        marketplace_order_id: args.order_id,
        supplier_order_id: args.supplier_order_id,
        product_id: args.product_id,
        buyer_name: args.buyer_name,
        buyer_email: args.buyer_email,
        order_total: args.total,
        order_status: args.status,
        fulfillment_status: args.fulfillment,
        tracking_number: args.tracking_number,
        carrier: args.carrier,
        profit: args.profit,
    };
    let order = desk.order_book.record(input, user_id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "orders.record",
            "order": order,
        }));
        return Ok(());
    }

    output::success(&format!("Recorded order {}", order.marketplace_order_id));
    output::field("Product", order.product_id);
    output::field("Total", output::money(order.order_total));
    output::field("Profit", output::money_opt(order.profit));
    Ok(())
}

/// Execute `flipdesk orders list`.
pub async fn list(desk: &Desk, args: OrderListArgs) -> Result<()> {
    let filter = OrderFilter {
        user_id: args.user,
        status: args.status,
    };
    let orders = desk.order_book.list(&filter).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "orders.list",
            "count": orders.len(),
            "orders": orders,
        }));
        return Ok(());
    }

    output::section(&format!("{} orders", orders.len()));
    if orders.is_empty() {
        return Ok(());
    }
    output::table(orders.iter().map(OrderRow::from));
    Ok(())
}
