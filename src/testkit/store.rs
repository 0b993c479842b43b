//! In-memory [`ProductStore`] and [`OrderStore`] implementations.
//!
//! Both enforce the same uniqueness rules as the SQLite stores and can be
//! told to fail writes, which is how tests reach the persistence error
//! paths. Clones share state.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::order::{NewOrder, Order, OrderFilter};
use crate::domain::product::{NewProduct, Product, ProductFilter};
use crate::error::{Error, Result};
use crate::port::outbound::store::{OrderStore, ProductStore};

#[derive(Default)]
struct ProductState {
    products: Vec<Product>,
    next_id: i32,
    write_failure: Option<String>,
}

/// Product store backed by a `Vec`.
#[derive(Clone, Default)]
pub struct MemoryProductStore {
    state: Arc<Mutex<ProductState>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with already-persisted products.
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            state: Arc::new(Mutex::new(ProductState {
                products,
                next_id,
                write_failure: None,
            })),
        }
    }

    /// Make every subsequent `create` fail with a database error.
    pub fn fail_writes(&self, message: &str) {
        self.state.lock().write_failure = Some(message.to_string());
    }

    /// Snapshot of everything stored.
    pub fn products(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProductStore for MemoryProductStore {
    async fn create(&self, product: NewProduct) -> Result<Product> {
        let mut state = self.state.lock();
        if let Some(message) = &state.write_failure {
            return Err(Error::Database(message.clone()));
        }
        if state.products.iter().any(|p| p.source_id == product.source_id) {
            return Err(Error::UniqueViolation {
                entity: "product",
                detail: format!("source_id {}", product.source_id),
            });
        }
        if let Some(listing_id) = &product.listing_id {
            if state
                .products
                .iter()
                .any(|p| p.listing_id.as_ref() == Some(listing_id))
            {
                return Err(Error::UniqueViolation {
                    entity: "product",
                    detail: format!("listing_id {listing_id}"),
                });
            }
        }

        state.next_id += 1;
        let now = Utc::now();
        let stored = Product {
            id: state.next_id,
            source_id: product.source_id,
            listing_id: product.listing_id,
            title: product.title,
            description: product.description,
            category: product.category,
            cost_price: product.cost_price,
            list_price: product.list_price,
            profit: product.profit,
            roi: product.roi,
            status: product.status,
            image_url: product.image_url,
            user_id: product.user_id,
            created_at: now,
            updated_at: now,
        };
        state.products.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        Ok(self
            .state
            .lock()
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Product>> {
        Ok(self
            .state
            .lock()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn count_all(&self) -> Result<u64> {
        Ok(self.state.lock().products.len() as u64)
    }
}

#[derive(Default)]
struct OrderState {
    orders: Vec<Order>,
    next_id: i32,
}

/// Order store backed by a `Vec`.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    state: Arc<Mutex<OrderState>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().orders.clone()
    }
}

impl OrderStore for MemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let mut state = self.state.lock();
        if state
            .orders
            .iter()
            .any(|o| o.marketplace_order_id == order.marketplace_order_id)
        {
            return Err(Error::UniqueViolation {
                entity: "order",
                detail: format!("marketplace_order_id {}", order.marketplace_order_id),
            });
        }

        state.next_id += 1;
        let stored = Order {
            id: state.next_id,
            marketplace_order_id: order.marketplace_order_id,
            supplier_order_id: order.supplier_order_id,
            product_id: order.product_id,
            buyer_name: order.buyer_name,
            buyer_email: order.buyer_email,
            order_total: order.order_total,
            order_status: order.order_status,
            fulfillment_status: order.fulfillment_status,
            tracking_number: order.tracking_number,
            carrier: order.carrier,
            profit: order.profit,
            user_id: order.user_id,
            created_at: Utc::now(),
        };
        state.orders.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        Ok(self
            .state
            .lock()
            .orders
            .iter()
            .rev()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<u64> {
        Ok(self.state.lock().orders.len() as u64)
    }
}
