//! Handler for the `products` command.

use serde_json::json;
use tabled::Tabled;

use super::command::ProductsArgs;
use super::output;
use crate::domain::product::{Product, ProductFilter};
use crate::error::Result;
use crate::infrastructure::bootstrap::Desk;
use crate::port::outbound::store::ProductStore;

#[derive(Tabled)]
pub(super) struct ProductRow {
    #[tabled(rename = "Id")]
    id: i32,
    #[tabled(rename = "Source Id")]
    source_id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn cents(value: Option<rust_decimal::Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            source_id: product.source_id.clone(),
            title: product.title.chars().take(40).collect(),
            status: product.status.to_string(),
            cost: format!("{:.2}", product.cost_price),
            price: cents(product.list_price),
            profit: cents(product.profit),
            created: product.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute `flipdesk products`.
pub async fn execute(desk: &Desk, args: ProductsArgs) -> Result<()> {
    let filter = ProductFilter {
        user_id: args.user,
        status: args.status,
    };
    let products = desk.products.find_all(&filter).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "products",
            "count": products.len(),
            "products": products,
        }));
        return Ok(());
    }

    output::section(&format!("{} products", products.len()));
    if products.is_empty() {
        return Ok(());
    }
    output::table(products.iter().map(ProductRow::from));
    Ok(())
}
