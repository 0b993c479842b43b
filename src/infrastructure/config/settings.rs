//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; every field has a
//! default, and `FLIPDESK_DATABASE_URL` overrides the database location.
//!
//! # Example
//!
//! ```no_run
//! use flipdesk::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::pricing::{arbitrage_settings, PricingConfig, SearchConfig};
use crate::adapter::outbound::process::{WorkerCommand, WorkerSettings};
use crate::application::arbitrage::ArbitrageSettings;
use crate::domain::worker::WorkerOperation;
use crate::error::{ConfigError, Result};

/// Environment variable that replaces `[database].url`.
pub const DATABASE_URL_ENV: &str = "FLIPDESK_DATABASE_URL";

/// SQLite database location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "flipdesk.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Owner recorded on products and orders created from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: i32,
}

const fn default_user_id() -> i32 {
    1
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub worker: WorkerSettings,
    #[serde(default)]
    pub user: UserConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when it exists, otherwise start from defaults.
    ///
    /// # Errors
    /// Same as [`Config::load`] for an existing file.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.database.url = url;
            }
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }

        let pricing = &self.pricing;
        non_negative(pricing.markup_percent, "pricing.markup_percent")?;
        fee_rate(pricing.marketplace_fee_rate, "pricing.marketplace_fee_rate")?;
        fee_rate(pricing.payment_fee_rate, "pricing.payment_fee_rate")?;
        non_negative(pricing.payment_fee_fixed, "pricing.payment_fee_fixed")?;

        non_negative(self.search.min_profit, "search.min_profit")?;
        if self.search.max_price <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "search.max_price",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.worker.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.worker.max_output_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.max_output_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        for operation in WorkerOperation::ALL {
            worker_command(self.worker.command(operation), operation)?;
        }

        Ok(())
    }

    /// Settings for the arbitrage orchestrator.
    #[must_use]
    pub fn arbitrage(&self) -> ArbitrageSettings {
        arbitrage_settings(&self.pricing, &self.search, self.worker.timeout())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[allow(clippy::result_large_err)]
fn non_negative(value: Decimal, field: &'static str) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must not be negative".to_string(),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn fee_rate(value: Decimal, field: &'static str) -> Result<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be between 0 and 1".to_string(),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn worker_command(command: &WorkerCommand, operation: WorkerOperation) -> Result<()> {
    if command.program.trim().is_empty() {
        let field = match operation {
            WorkerOperation::Search => "worker.search.program",
            WorkerOperation::List => "worker.list.program",
            WorkerOperation::CheckPrice => "worker.check_price.program",
        };
        return Err(ConfigError::MissingField { field }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.pricing.markup_percent, dec!(15));
        assert_eq!(config.search.max_price, dec!(100));
        assert_eq!(config.worker.timeout_secs, 60);
        assert_eq!(config.user.id, 1);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [pricing]
            markup_percent = 25
            payment_fee_fixed = "0.49"

            [search]
            min_profit = 2.5

            [worker]
            timeout_secs = 5

            [worker.list]
            program = "/opt/workers/list"
            args = ["--sandbox"]

            [user]
            id = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.pricing.markup_percent, dec!(25));
        assert_eq!(config.pricing.payment_fee_fixed, dec!(0.49));
        assert_eq!(config.search.min_profit, dec!(2.5));
        assert_eq!(config.worker.list.program, "/opt/workers/list");
        assert_eq!(config.worker.search.args, vec!["scripts/product_finder.py"]);
        assert_eq!(config.user.id, 7);

        let arbitrage = config.arbitrage();
        assert_eq!(arbitrage.markup_percent, dec!(25));
        assert_eq!(arbitrage.worker_timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn rejects_fee_rate_above_one() {
        let err = Config::parse_toml("[pricing]\nmarketplace_fee_rate = 1.5").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "pricing.marketplace_fee_rate",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_timeout_and_blank_program() {
        assert!(Config::parse_toml("[worker]\ntimeout_secs = 0").is_err());
        let err = Config::parse_toml("[worker.search]\nprogram = \" \"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "worker.search.program"
            })
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[pricing\nmarkup_percent = 1").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.pricing, PricingConfig::default());
    }
}
