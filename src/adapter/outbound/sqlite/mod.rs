//! SQLite persistence adapters.
//!
//! Provides Diesel-backed implementations of the product and order stores.

pub mod database;
pub mod order;
pub mod product;

pub use order::SqliteOrderStore;
pub use product::SqliteProductStore;
