//! Handlers for `search`, `list` and `profit`.

use serde_json::{json, Value};
use tabled::Tabled;

use super::command::{ListArgs, ProfitArgs, SearchArgs};
use super::output;
use crate::application::arbitrage::{
    CheckProfitabilityRequest, ListRequest, ProfitabilityReport, SearchRequest,
};
use crate::error::Result;
use crate::infrastructure::bootstrap::Desk;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Source Id")]
    source_id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Est. Profit")]
    profit: String,
}

fn text(candidate: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match candidate.get(*key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Execute `flipdesk search`.
pub async fn search(desk: &Desk, args: SearchArgs) -> Result<()> {
    let request = SearchRequest {
        keywords: Some(args.keywords),
        category: args.category,
        min_profit: args.min_profit,
        max_price: args.max_price,
    };
    let candidates = desk.arbitrage.search(&request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "search",
            "count": candidates.len(),
            "candidates": candidates,
        }));
        return Ok(());
    }

    output::section(&format!("{} candidates", candidates.len()));
    if candidates.is_empty() {
        output::note("No items matched; try a higher --max-price or lower --min-profit.");
        return Ok(());
    }
    output::table(candidates.iter().map(|c| CandidateRow {
        source_id: text(c, &["asin", "sourceId", "id"]),
        title: text(c, &["title"]).chars().take(60).collect(),
        price: text(c, &["price", "costPrice", "amazonPrice"]),
        profit: text(c, &["estimatedProfit", "profit", "netProfit"]),
    }));
    Ok(())
}

/// Execute `flipdesk list`.
pub async fn list(desk: &Desk, args: ListArgs) -> Result<()> {
    let request = ListRequest {
        source_id: Some(args.source_id),
        markup_percent: args.markup,
        title: args.title,
        description: args.description,
    };
    let user_id = args.user.unwrap_or(desk.user_id);
    let product = desk.arbitrage.list(&request, user_id).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "list",
            "product": product,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Listed {} as {}",
        product.source_id,
        output::highlight(product.listing_id.as_deref().unwrap_or("-"))
    ));
    output::field("Title", &product.title);
    output::field("Cost", output::money(product.cost_price));
    output::field("List price", output::money_opt(product.list_price));
    output::field("Net profit", output::money_opt(product.profit));
    output::field(
        "ROI",
        product
            .roi
            .map_or_else(|| output::muted("-"), |roi| format!("{roi:.2}%")),
    );
    Ok(())
}

/// Execute `flipdesk profit`.
pub async fn profit(desk: &Desk, args: ProfitArgs) -> Result<()> {
    let request = CheckProfitabilityRequest {
        source_id: Some(args.source_id.clone()),
        cost_price: args.cost_price,
    };
    let report = desk.arbitrage.check_profitability(&request).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "profit",
            "sourceId": args.source_id,
            "markupPercent": desk.arbitrage.settings().markup_percent,
            "report": report,
        }));
        return Ok(());
    }

    print_report(&args.source_id, &report);
    Ok(())
}

fn print_report(source_id: &str, report: &ProfitabilityReport) {
    let figures = &report.figures;
    output::section(&format!("Profitability of {source_id}"));
    output::field("Cost", output::money(figures.cost_price));
    output::field("List price", output::money(figures.list_price));
    output::field("Marketplace fee", output::money(-figures.marketplace_fee));
    output::field("Payment fee", output::money(-figures.payment_processing_fee));
    output::field("Net profit", output::money(figures.net_profit));
    output::field("ROI", format!("{:.2}%", figures.roi_percent));
    if let Some(details) = &report.product_details {
        if let Some(title) = details.get("title").and_then(Value::as_str) {
            output::field("Title", title);
        }
    }
}
