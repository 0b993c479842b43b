//! Handler for the `stats` command.

use serde_json::json;
use tabled::Tabled;

use super::output;
use super::products::ProductRow;
use crate::domain::stats::AggregateStats;
use crate::error::Result;
use crate::infrastructure::bootstrap::Desk;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Products")]
    count: u64,
    #[tabled(rename = "Total Profit")]
    total_profit: String,
}

/// Execute `flipdesk stats`.
pub async fn execute(desk: &Desk) -> Result<()> {
    let stats = desk.stats.compute_stats().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "stats",
            "stats": stats,
        }));
        return Ok(());
    }

    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &AggregateStats) {
    let financials = &stats.financials;
    output::section("Products");
    output::field("Total", stats.total_products);

    output::section("Financials");
    output::field("Total profit", output::money(financials.total_profit));
    output::field("Average profit", output::money(financials.avg_profit));
    output::field("Total revenue", output::money(financials.total_revenue));
    output::field("Total cost", output::money(financials.total_cost));

    if stats.total_products == 0 {
        println!();
        output::note("No products recorded yet. Run `flipdesk list` to add one.");
        return;
    }

    output::section("Profit by category");
    output::table(stats.profit_by_category.iter().map(|c| CategoryRow {
        category: c.category.clone(),
        count: c.count,
        total_profit: format!("${:.2}", c.total_profit),
    }));

    output::section("Recent listings");
    output::table(stats.recent_listings.iter().map(ProductRow::from));
}
