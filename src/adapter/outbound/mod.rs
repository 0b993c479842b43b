//! Outbound adapters (driven side).

pub mod process;
pub mod sqlite;
