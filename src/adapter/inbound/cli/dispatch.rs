//! Command dispatch.

use super::command::{Cli, Commands, OrdersCommand};
use super::{arbitrage, orders, products, stats, status};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run the parsed command against services built from `config`.
///
/// # Errors
/// Returns the command's error unchanged.
pub async fn run(cli: Cli, config: &Config) -> Result<()> {
    if let Commands::Status = cli.command {
        return status::execute(config, &cli.config).await;
    }

    let desk = bootstrap::build(config)?;
    match cli.command {
        Commands::Search(args) => arbitrage::search(&desk, args).await,
        Commands::List(args) => arbitrage::list(&desk, args).await,
        Commands::Profit(args) => arbitrage::profit(&desk, args).await,
        Commands::Stats => stats::execute(&desk).await,
        Commands::Products(args) => products::execute(&desk, args).await,
        Commands::Orders(OrdersCommand::Record(args)) => orders::record(&desk, args).await,
        Commands::Orders(OrdersCommand::List(args)) => orders::list(&desk, args).await,
        Commands::Status => status::execute(config, &cli.config).await,
    }
}
