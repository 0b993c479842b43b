//! Handler for the `status` command.

use std::path::Path;

use serde_json::json;
use tabled::Tabled;

use super::output;
use crate::adapter::outbound::process::{probe_all, CommandProbe};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::{OrderStore, ProductStore};

/// Database reachability and record counts.
#[derive(Debug)]
enum DatabaseStatus {
    Ready { products: u64, orders: u64 },
    Unavailable { error: String },
}

async fn database_status(config: &Config) -> DatabaseStatus {
    let counts = async {
        let desk = bootstrap::build(config)?;
        let products = desk.products.count_all().await?;
        let orders = desk.orders.count_all().await?;
        Ok::<_, crate::error::Error>((products, orders))
    };
    match counts.await {
        Ok((products, orders)) => DatabaseStatus::Ready { products, orders },
        Err(e) => DatabaseStatus::Unavailable {
            error: e.to_string(),
        },
    }
}

#[derive(Tabled)]
struct WorkerRow {
    #[tabled(rename = "Operation")]
    operation: String,
    #[tabled(rename = "Program")]
    program: String,
    #[tabled(rename = "Scripts")]
    scripts: String,
    #[tabled(rename = "Ready")]
    ready: &'static str,
}

impl From<&CommandProbe> for WorkerRow {
    fn from(probe: &CommandProbe) -> Self {
        let program = probe.resolved.as_ref().map_or_else(
            || format!("{} (not found)", probe.program),
            |path| path.display().to_string(),
        );
        let scripts = probe
            .scripts
            .iter()
            .map(|s| {
                if s.exists {
                    s.path.clone()
                } else {
                    format!("{} (missing)", s.path)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            operation: probe.operation.to_string(),
            program,
            scripts: if scripts.is_empty() { "-".into() } else { scripts },
            ready: if probe.is_ready() { "yes" } else { "no" },
        }
    }
}

/// Execute `flipdesk status`.
///
/// Always succeeds; problems are reported rather than returned.
pub async fn execute(config: &Config, config_path: &Path) -> Result<()> {
    let database = database_status(config).await;
    let workers = probe_all(&config.worker);

    if output::is_json() {
        let database_json = match &database {
            DatabaseStatus::Ready { products, orders } => json!({
                "url": config.database.url,
                "status": "ok",
                "products": products,
                "orders": orders,
            }),
            DatabaseStatus::Unavailable { error } => json!({
                "url": config.database.url,
                "status": "error",
                "error": error,
            }),
        };
        output::json_output(json!({
            "command": "status",
            "config": config_path.display().to_string(),
            "configFound": config_path.exists(),
            "database": database_json,
            "workers": workers,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field(
        "Config",
        if config_path.exists() {
            config_path.display().to_string()
        } else {
            format!("{} (not found, using defaults)", config_path.display())
        },
    );
    output::field("Database", &config.database.url);

    output::section("Database");
    match database {
        DatabaseStatus::Ready { products, orders } => {
            output::success("Reachable");
            output::field("Products", products);
            output::field("Orders", orders);
        }
        DatabaseStatus::Unavailable { error } => {
            output::warning(&format!("Unavailable: {error}"));
        }
    }

    output::section("Workers");
    output::table(workers.iter().map(WorkerRow::from));
    if workers.iter().any(|w| !w.is_ready()) {
        output::note("Workers that are not ready will fail to launch.");
    }
    Ok(())
}
