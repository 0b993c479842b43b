//! Command-line surface.
//!
//! `command` defines the clap parser, `dispatch` routes each subcommand to
//! its handler, and `output` owns all terminal formatting.

pub mod arbitrage;
pub mod command;
pub mod dispatch;
pub mod orders;
pub mod output;
pub mod products;
pub mod stats;
pub mod status;
