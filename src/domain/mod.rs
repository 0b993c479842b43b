//! Marketplace-agnostic domain logic.
//!
//! Nothing in here performs I/O: the profitability calculator and the
//! statistics rollup are pure functions over values.

pub mod error;
pub mod money;
pub mod order;
pub mod product;
pub mod profitability;
pub mod stats;
pub mod worker;

pub use error::{DomainError, ValidationError};
pub use money::{round_money, Price};
pub use order::{FulfillmentStatus, NewOrder, Order, OrderFilter, OrderStatus};
pub use product::{NewProduct, Product, ProductFilter, ProductStatus};
pub use profitability::{compute, FeeSchedule, ProfitabilityFigures};
pub use stats::{AggregateStats, CategoryProfit, Financials};
pub use worker::{WorkerFailure, WorkerOperation, WorkerRequest, WorkerResult};
