//! Arbitrage orchestration: search, list and profitability workflows.
//!
//! Each workflow validates caller input, optionally runs one worker, feeds
//! the outcome through the profitability calculator and, for listings,
//! records the product. Nothing here is retried; a failed step surfaces as a
//! distinct [`Error`] variant.
//!
//! # Flow
//!
//! ```text
//! search  ──▶ validate ──▶ worker(search) ──▶ candidates
//! list    ──▶ validate ──▶ worker(list)   ──▶ store.create ──▶ Product
//! profit  ──▶ validate ──┬─────────────────────────▶ compute ──▶ report
//!                        └─▶ worker(check_price) ──▶ compute ──▶ report
//! ```

mod payload;
mod request;

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::money::round_money;
use crate::domain::product::{NewProduct, Product, ProductStatus, MAX_TITLE_LEN};
use crate::domain::profitability::{compute, FeeSchedule};
use crate::domain::worker::{WorkerOperation, WorkerRequest};
use crate::error::{Error, Result};
use crate::port::outbound::store::ProductStore;
use crate::port::outbound::worker::Worker;

pub use request::{CheckProfitabilityRequest, ListRequest, ProfitabilityReport, SearchRequest};

/// Policy values the workflows need; passed in rather than read globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrageSettings {
    pub fees: FeeSchedule,
    /// Markup used when checking profitability.
    pub markup_percent: Decimal,
    pub default_min_profit: Decimal,
    pub default_max_price: Decimal,
    pub worker_timeout: Duration,
}

impl Default for ArbitrageSettings {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            markup_percent: dec!(15),
            default_min_profit: dec!(5),
            default_max_price: dec!(100),
            worker_timeout: Duration::from_secs(60),
        }
    }
}

/// Sequences worker invocation, fee computation and persistence.
pub struct ArbitrageService<W, S> {
    worker: W,
    products: S,
    settings: ArbitrageSettings,
}

impl<W: Worker, S: ProductStore> ArbitrageService<W, S> {
    #[must_use]
    pub fn new(worker: W, products: S, settings: ArbitrageSettings) -> Self {
        Self {
            worker,
            products,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ArbitrageSettings {
        &self.settings
    }

    async fn run(&self, request: WorkerRequest) -> Result<Value> {
        let operation = request.operation();
        self.worker
            .invoke(&request, self.settings.worker_timeout)
            .await
            .into_payload()
            .map_err(|failure| {
                warn!(
                    %operation,
                    classification = failure.classification(),
                    error = %failure,
                    "Worker failed"
                );
                Error::from(failure)
            })
    }

    /// Find candidate listings. The worker's documents are returned verbatim.
    ///
    /// # Errors
    /// `Validation` for missing keywords, `WorkerExecution` when the worker
    /// fails or does not return a list.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>> {
        let valid = request.validate(
            self.settings.default_min_profit,
            self.settings.default_max_price,
        )?;

        let worker_request = WorkerRequest::new(WorkerOperation::Search)
            .param("keywords", valid.keywords)
            .param("min-profit", valid.min_profit)
            .param("max-price", valid.max_price)
            .param_opt("category", valid.category);

        info!(keywords = valid.keywords, category = ?valid.category, "Searching for candidates");
        let document = self.run(worker_request).await?;
        let candidates = payload::candidates(document)?;
        info!(count = candidates.len(), "Search complete");
        Ok(candidates)
    }

    /// Create an external listing and record it as a `listed` product owned
    /// by `user_id`.
    ///
    /// Nothing is stored unless the worker succeeded and its document is
    /// complete.
    ///
    /// # Errors
    /// `Validation` before any side effect; `WorkerExecution` when the
    /// listing could not be created or its result is unusable;
    /// `DuplicateListing` when the source item is already recorded;
    /// `PersistenceAfterSideEffect` for any other save failure, including a
    /// clash on the listing id, since the listing already exists externally.
    pub async fn list(&self, request: &ListRequest, user_id: i32) -> Result<Product> {
        let valid = request.validate()?;

        let worker_request = WorkerRequest::new(WorkerOperation::List)
            .param("product-id", valid.source_id)
            .param("markup", valid.markup_percent)
            .param_opt("title", valid.title)
            .param_opt("description", valid.description);

        info!(source_id = valid.source_id, markup = %valid.markup_percent, "Listing product");
        let document = self.run(worker_request).await?;
        let listing = payload::listing(&document).map_err(|failure| {
            error!(
                source_id = valid.source_id,
                error = %failure,
                "Listing worker succeeded but its result is unusable; listing may exist externally"
            );
            Error::from(failure)
        })?;

        let title = listing
            .title
            .as_deref()
            .or(valid.title)
            .unwrap_or(valid.source_id)
            .chars()
            .take(MAX_TITLE_LEN)
            .collect();
        let record = NewProduct {
            source_id: valid.source_id.to_string(),
            listing_id: Some(listing.listing_id.clone()),
            title,
            description: valid.description.map(str::to_string),
            category: listing.category.clone(),
            cost_price: round_money(listing.cost_price),
            list_price: Some(round_money(listing.list_price)),
            profit: Some(round_money(listing.net_profit)),
            roi: Some(listing.roi),
            status: ProductStatus::Listed,
            image_url: listing.image_url.clone(),
            user_id,
        };

        match self.products.create(record).await {
            Ok(product) => {
                info!(
                    source_id = %product.source_id,
                    listing_id = %listing.listing_id,
                    profit = ?product.profit,
                    "Product listed"
                );
                Ok(product)
            }
            Err(cause) if cause.violates_unique("source_id") => {
                error!(
                    source_id = valid.source_id,
                    listing_id = %listing.listing_id,
                    error = %cause,
                    "Listing created for a product that is already recorded"
                );
                Err(Error::DuplicateListing {
                    source_id: valid.source_id.to_string(),
                    listing_id: Some(listing.listing_id),
                })
            }
            Err(cause) => {
                error!(
                    source_id = valid.source_id,
                    listing_id = %listing.listing_id,
                    error = %cause,
                    "Listing created but could not be saved; external and local state diverge"
                );
                Err(Error::PersistenceAfterSideEffect {
                    source_id: valid.source_id.to_string(),
                    listing_id: listing.listing_id,
                    cause: Box::new(cause),
                })
            }
        }
    }

    /// Profitability of relisting an item at the configured markup.
    ///
    /// With an explicit cost price the worker is skipped; otherwise the live
    /// price is resolved first. Both paths produce identical figures for the
    /// same price.
    ///
    /// # Errors
    /// `Validation` without a source id, `WorkerExecution` when the price
    /// cannot be resolved, `InvalidInput` for a non-positive cost.
    pub async fn check_profitability(
        &self,
        request: &CheckProfitabilityRequest,
    ) -> Result<ProfitabilityReport> {
        let source_id = request.validate()?;

        if let Some(cost_price) = request.cost_price {
            let figures = compute(cost_price, self.settings.markup_percent, &self.settings.fees)?;
            return Ok(ProfitabilityReport {
                figures,
                product_details: None,
            });
        }

        info!(source_id, "Resolving live price");
        let worker_request =
            WorkerRequest::new(WorkerOperation::CheckPrice).param("product-id", source_id);
        let document = self.run(worker_request).await?;
        let cost_price = payload::price(&document)?;
        let figures = compute(cost_price, self.settings.markup_percent, &self.settings.fees)?;

        Ok(ProfitabilityReport {
            figures,
            product_details: Some(document),
        })
    }
}
