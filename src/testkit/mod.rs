//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for products and orders.
//! - [`store`] - In-memory `ProductStore` and `OrderStore` with write failure
//!   injection.
//! - [`worker`] - `ScriptedWorker`, a `Worker` that replays queued results.

pub mod domain;
pub mod store;
pub mod worker;
