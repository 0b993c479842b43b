//! Dashboard statistics over the product collection.

use tracing::debug;

use crate::domain::product::ProductFilter;
use crate::domain::stats::AggregateStats;
use crate::error::Result;
use crate::port::outbound::store::ProductStore;

/// Computes [`AggregateStats`] from one snapshot read.
///
/// Holds no state of its own; consistency comes from the store's snapshot.
pub struct StatsService<S> {
    products: S,
}

impl<S: ProductStore> StatsService<S> {
    #[must_use]
    pub fn new(products: S) -> Self {
        Self { products }
    }

    /// Recompute statistics from the live collection.
    ///
    /// # Errors
    /// Propagates store read failures. An empty collection is not an error.
    pub async fn compute_stats(&self) -> Result<AggregateStats> {
        let snapshot = self.products.find_all(&ProductFilter::default()).await?;
        let stats = AggregateStats::from_products(&snapshot);
        debug!(
            total_products = stats.total_products,
            categories = stats.profit_by_category.len(),
            "Computed statistics"
        );
        Ok(stats)
    }
}
