//! Persistence ports for products and orders.
//!
//! Uniqueness is enforced by the store: a second product with the same
//! `source_id`, or a second order with the same marketplace order id, fails
//! with [`Error::UniqueViolation`](crate::error::Error::UniqueViolation).

use std::future::Future;

use crate::domain::order::{NewOrder, Order, OrderFilter};
use crate::domain::product::{NewProduct, Product, ProductFilter};
use crate::error::Result;

/// Storage operations for products.
///
/// `find_all` must return a consistent snapshot; statistics are derived from
/// a single call.
pub trait ProductStore: Send + Sync {
    /// Insert a product and return it with its assigned id and timestamps.
    fn create(&self, product: NewProduct) -> impl Future<Output = Result<Product>> + Send;

    /// All products matching `filter`, oldest first.
    fn find_all(&self, filter: &ProductFilter) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Get a product by id.
    fn get(&self, id: i32) -> impl Future<Output = Result<Option<Product>>> + Send;

    /// Number of stored products.
    fn count_all(&self) -> impl Future<Output = Result<u64>> + Send;
}

/// Storage operations for orders.
pub trait OrderStore: Send + Sync {
    /// Insert an order and return it with its assigned id.
    fn create(&self, order: NewOrder) -> impl Future<Output = Result<Order>> + Send;

    /// All orders matching `filter`, newest first.
    fn find_all(&self, filter: &OrderFilter) -> impl Future<Output = Result<Vec<Order>>> + Send;

    /// Number of stored orders.
    fn count_all(&self) -> impl Future<Output = Result<u64>> + Send;
}
