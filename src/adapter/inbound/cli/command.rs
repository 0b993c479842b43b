//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::order::{FulfillmentStatus, OrderStatus};
use crate::domain::product::ProductStatus;

/// Cross-marketplace arbitrage desk
#[derive(Parser, Debug)]
#[command(name = "flipdesk")]
#[command(version)]
pub struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the source marketplace for items worth relisting
    Search(SearchArgs),

    /// List a sourced item on the selling marketplace and record it
    List(ListArgs),

    /// Check the profitability of relisting an item
    Profit(ProfitArgs),

    /// Show aggregate statistics over recorded products
    Stats,

    /// List recorded products
    Products(ProductsArgs),

    /// Record and list customer orders
    #[command(subcommand)]
    Orders(OrdersCommand),

    /// Show database and worker readiness
    Status,
}

/// Arguments for `flipdesk search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search keywords
    pub keywords: String,

    /// Restrict results to a category
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum profit per item (defaults to `[search].min_profit`)
    #[arg(long)]
    pub min_profit: Option<Decimal>,

    /// Maximum source price (defaults to `[search].max_price`)
    #[arg(long)]
    pub max_price: Option<Decimal>,
}

/// Arguments for `flipdesk list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Source marketplace item id
    #[arg(long)]
    pub source_id: String,

    /// Markup over the source price in percent
    #[arg(long)]
    pub markup: Option<Decimal>,

    /// Listing title (at most 100 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// Listing description (at most 5000 characters)
    #[arg(long)]
    pub description: Option<String>,

    /// Owning user (defaults to `[user].id`)
    #[arg(long)]
    pub user: Option<i32>,
}

/// Arguments for `flipdesk profit`.
#[derive(Args, Debug)]
pub struct ProfitArgs {
    /// Source marketplace item id
    #[arg(long)]
    pub source_id: String,

    /// Known cost price; skips the live price lookup
    #[arg(long)]
    pub cost_price: Option<Decimal>,
}

/// Arguments for `flipdesk products`.
#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Only products in this status [pending, listed, sold, error]
    #[arg(long)]
    pub status: Option<ProductStatus>,

    /// Only products owned by this user
    #[arg(long)]
    pub user: Option<i32>,
}

/// Subcommands for `flipdesk orders`.
#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// Record an order received on the selling marketplace
    Record(OrderRecordArgs),
    /// List recorded orders, newest first
    List(OrderListArgs),
}

/// Arguments for `flipdesk orders record`.
#[derive(Args, Debug)]
pub struct OrderRecordArgs {
    /// Marketplace order id
    #[arg(long)]
    pub order_id: String,

    /// Recorded product the order is for
    #[arg(long)]
    pub product_id: i32,

    #[arg(long)]
    pub buyer_name: String,

    #[arg(long)]
    pub buyer_email: String,

    /// Amount the buyer paid
    #[arg(long)]
    pub total: Decimal,

    /// Order id at the source marketplace
    #[arg(long)]
    pub supplier_order_id: Option<String>,

    /// Order status [received, processing, ordered, shipped, delivered, cancelled, refunded]
    #[arg(long)]
    pub status: Option<OrderStatus>,

    /// Fulfillment status [pending, fulfilled, failed]
    #[arg(long)]
    pub fulfillment: Option<FulfillmentStatus>,

    #[arg(long)]
    pub tracking_number: Option<String>,

    #[arg(long)]
    pub carrier: Option<String>,

    /// Known profit; derived from the product cost and fees when omitted
    #[arg(long)]
    pub profit: Option<Decimal>,

    /// Owning user (defaults to `[user].id`)
    #[arg(long)]
    pub user: Option<i32>,
}

/// Arguments for `flipdesk orders list`.
#[derive(Args, Debug)]
pub struct OrderListArgs {
    /// Only orders in this status
    #[arg(long)]
    pub status: Option<OrderStatus>,

    /// Only orders owned by this user
    #[arg(long)]
    pub user: Option<i32>,
}
