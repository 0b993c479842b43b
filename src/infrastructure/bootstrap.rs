//! Composition root: builds the services a command needs from [`Config`].

use tracing::{debug, info};

use crate::adapter::outbound::process::ProcessWorker;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::{SqliteOrderStore, SqliteProductStore};
use crate::application::arbitrage::ArbitrageService;
use crate::application::order::OrderService;
use crate::application::stats::StatsService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Services wired against SQLite and the configured worker processes.
pub struct Desk {
    pub products: SqliteProductStore,
    pub orders: SqliteOrderStore,
    pub arbitrage: ArbitrageService<ProcessWorker, SqliteProductStore>,
    pub stats: StatsService<SqliteProductStore>,
    pub order_book: OrderService<SqliteOrderStore, SqliteProductStore>,
    pub user_id: i32,
}

/// Open the database, apply migrations and assemble the services.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn build(config: &Config) -> Result<Desk> {
    let pool = create_pool(&config.database.url)?;
    run_migrations(&pool)?;
    info!(database = %config.database.url, "Database ready");

    let products = SqliteProductStore::new(pool.clone());
    let orders = SqliteOrderStore::new(pool.clone());
    let worker = ProcessWorker::new(config.worker.clone());
    debug!(timeout_secs = config.worker.timeout_secs, "Worker configured");

    Ok(Desk {
        arbitrage: ArbitrageService::new(worker, products.clone(), config.arbitrage()),
        stats: StatsService::new(products.clone()),
        order_book: OrderService::new(orders.clone(), products.clone(), config.pricing.fees()),
        products,
        orders,
        user_id: config.user.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::store::{OrderStore, ProductStore};

    #[tokio::test]
    async fn builds_against_a_fresh_database() {
        let mut config = Config::default();
        config.database.url = ":memory:".into();
        config.user.id = 9;

        let desk = build(&config).unwrap();

        assert_eq!(desk.user_id, 9);
        assert_eq!(desk.products.count_all().await.unwrap(), 0);
        assert_eq!(desk.orders.count_all().await.unwrap(), 0);
        assert_eq!(desk.stats.compute_stats().await.unwrap().total_products, 0);
    }
}
