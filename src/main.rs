use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use flipdesk::adapter::inbound::cli::command::Cli;
use flipdesk::adapter::inbound::cli::dispatch;
use flipdesk::adapter::inbound::cli::output::{self, OutputConfig};
use flipdesk::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json));

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output::error(e.kind(), &format!("Failed to load config: {e}"));
            return ExitCode::FAILURE;
        }
    };
    config.init_logging();
    debug!(config = %cli.config.display(), "flipdesk starting");

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e
                .downcast_ref::<flipdesk::error::Error>()
                .map_or("internal", flipdesk::error::Error::kind);
            debug!(kind, error = ?e, "Command failed");
            output::error(kind, &format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    dispatch::run(cli, config).await?;
    Ok(())
}
