//! Flipdesk - cross-marketplace arbitrage desk.
//!
//! Finds items on a source marketplace that can be relisted at a profit on a
//! selling marketplace, creates the listings and keeps the books.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - Pure types and arithmetic: money rounding, the fee
//!   schedule, the profitability calculator, products, orders and statistics.
//! - **`port`** - Traits the application depends on: the `Worker` that runs
//!   marketplace automation, and the product and order stores.
//! - **`application`** - Use cases: the arbitrage orchestrator (search, list,
//!   profitability), statistics and order bookkeeping.
//! - **`adapter`** - Child-process workers, SQLite persistence and the CLI.
//! - **`infrastructure`** - Configuration, logging and service wiring.
//!
//! Marketplace access itself lives in external worker programs. Each worker
//! is started with `--key value` arguments and prints one JSON document.
//!
//! # Example
//!
//! ```
//! use flipdesk::domain::profitability::{compute, FeeSchedule};
//! use rust_decimal_macros::dec;
//!
//! let figures = compute(dec!(100), dec!(25), &FeeSchedule::default()).unwrap();
//! assert_eq!(figures.list_price, dec!(125.00));
//! assert_eq!(figures.net_profit, dec!(8.58));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
