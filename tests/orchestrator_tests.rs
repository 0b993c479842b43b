//! Arbitrage orchestrator behaviour against a scripted worker and an
//! in-memory store.

mod support;

use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::json;

use flipdesk::application::arbitrage::{
    ArbitrageService, ArbitrageSettings, CheckProfitabilityRequest, ListRequest, SearchRequest,
};
use flipdesk::domain::{
    DomainError, ProductStatus, ValidationError, WorkerFailure, WorkerOperation,
};
use flipdesk::error::Error;
use flipdesk::testkit::domain::new_product;
use flipdesk::testkit::store::MemoryProductStore;
use flipdesk::testkit::worker::ScriptedWorker;
use flipdesk::port::outbound::store::ProductStore;

use support::payloads;

type Service = ArbitrageService<ScriptedWorker, MemoryProductStore>;

fn service(worker: &ScriptedWorker, store: &MemoryProductStore) -> Service {
    ArbitrageService::new(worker.clone(), store.clone(), ArbitrageSettings::default())
}

fn list_request(source_id: &str) -> ListRequest {
    ListRequest {
        source_id: Some(source_id.into()),
        markup_percent: Some(dec!(50)),
        ..ListRequest::default()
    }
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// -------------------------------------------------------------------------
// search
// -------------------------------------------------------------------------

#[tokio::test]
async fn search_without_keywords_never_starts_a_worker() {
    let worker = ScriptedWorker::new();
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .search(&SearchRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingField { field: "keywords" })
    ));
    assert_eq!(worker.call_count(), 0);
}

#[tokio::test]
async fn search_passes_thresholds_in_order_and_returns_candidates_verbatim() {
    let worker = ScriptedWorker::new().succeed(payloads::search_results());
    let store = MemoryProductStore::new();

    let candidates = service(&worker, &store)
        .search(&SearchRequest {
            keywords: Some("desk lamp".into()),
            category: Some("home".into()),
            min_profit: Some(dec!(2.50)),
            max_price: None,
        })
        .await
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[1]["asin"], json!("B08L5TNJHG"));

    let requests = worker.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].operation(), WorkerOperation::Search);
    assert_eq!(
        requests[0].to_args(),
        args(&[
            "--keywords", "desk lamp", "--min-profit", "2.50", "--max-price", "100", "--category",
            "home",
        ])
    );
    assert_eq!(worker.timeouts(), vec![Duration::from_secs(60)]);
}

#[tokio::test]
async fn search_result_that_is_not_a_list_is_malformed() {
    let worker = ScriptedWorker::new().succeed(json!({ "error": "captcha" }));
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .search(&SearchRequest {
            keywords: Some("lamp".into()),
            ..SearchRequest::default()
        })
        .await
        .unwrap_err();

    match err {
        Error::WorkerExecution(failure) => assert_eq!(failure.classification(), "malformed_output"),
        other => panic!("expected worker failure, got {other:?}"),
    }
}

#[tokio::test]
async fn search_failures_keep_their_classification() {
    let failures = [
        (
            WorkerFailure::Timeout {
                elapsed: Duration::from_secs(60),
            },
            "timeout",
        ),
        (
            WorkerFailure::NonZeroExit {
                exit_code: Some(2),
                stderr: "quota exceeded".into(),
            },
            "non_zero_exit",
        ),
        (
            WorkerFailure::LaunchFailed {
                reason: "python3: not found".into(),
            },
            "launch_failed",
        ),
    ];

    for (failure, expected) in failures {
        let worker = ScriptedWorker::new().fail(failure);
        let store = MemoryProductStore::new();
        let err = service(&worker, &store)
            .search(&SearchRequest {
                keywords: Some("lamp".into()),
                ..SearchRequest::default()
            })
            .await
            .unwrap_err();

        match err {
            Error::WorkerExecution(failure) => assert_eq!(failure.classification(), expected),
            other => panic!("expected worker failure, got {other:?}"),
        }
    }
}

// -------------------------------------------------------------------------
// list
// -------------------------------------------------------------------------

#[tokio::test]
async fn list_records_the_listing_reported_by_the_worker() {
    let worker = ScriptedWorker::new().succeed(payloads::ebay_listing("110553"));
    let store = MemoryProductStore::new();

    let product = service(&worker, &store)
        .list(&list_request("B07XJ8C8F5"), 7)
        .await
        .unwrap();

    assert_eq!(product.source_id, "B07XJ8C8F5");
    assert_eq!(product.listing_id.as_deref(), Some("110553"));
    assert_eq!(product.title, "Adjustable LED desk lamp");
    assert_eq!(product.cost_price, dec!(20.00));
    assert_eq!(product.list_price, Some(dec!(30.00)));
    assert_eq!(product.profit, Some(dec!(5.83)));
    assert_eq!(product.roi, Some(dec!(29.15)));
    assert_eq!(product.status, ProductStatus::Listed);
    assert_eq!(product.user_id, 7);
    assert_eq!(store.products(), vec![product]);

    assert_eq!(
        worker.requests()[0].to_args(),
        args(&["--product-id", "B07XJ8C8F5", "--markup", "50"])
    );
}

#[tokio::test]
async fn list_forwards_title_and_description() {
    let worker = ScriptedWorker::new().succeed(payloads::listing("L1", "10", "12.50", "0.39"));
    let store = MemoryProductStore::new();

    let product = service(&worker, &store)
        .list(
            &ListRequest {
                title: Some("Brass lamp".into()),
                description: Some("Solid brass".into()),
                ..list_request("B01")
            },
            1,
        )
        .await
        .unwrap();

    assert_eq!(product.title, "Brass lamp");
    assert_eq!(product.description.as_deref(), Some("Solid brass"));
    assert_eq!(
        worker.requests()[0].to_args(),
        args(&[
            "--product-id", "B01", "--markup", "50", "--title", "Brass lamp", "--description",
            "Solid brass",
        ])
    );
}

#[tokio::test]
async fn list_without_markup_is_rejected_before_any_side_effect() {
    let worker = ScriptedWorker::new();
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .list(
            &ListRequest {
                source_id: Some("B01".into()),
                ..ListRequest::default()
            },
            1,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(worker.call_count(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_listing_records_nothing() {
    let worker = ScriptedWorker::new().fail(WorkerFailure::NonZeroExit {
        exit_code: Some(1),
        stderr: "listing rejected".into(),
    });
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .list(&list_request("B01"), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::WorkerExecution(WorkerFailure::NonZeroExit { .. })));
    assert!(!err.is_divergent());
    assert!(store.is_empty());
}

#[tokio::test]
async fn incomplete_listing_result_records_nothing() {
    let worker = ScriptedWorker::new().succeed(json!({ "listingId": "L1", "listPrice": 12 }));
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .list(&list_request("B01"), 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::WorkerExecution(WorkerFailure::MalformedOutput { .. })
    ));
    assert!(store.is_empty());
}

#[tokio::test]
async fn listing_an_already_recorded_product_is_a_duplicate() {
    let worker = ScriptedWorker::new().succeed(payloads::ebay_listing("110554"));
    let store = MemoryProductStore::new();
    store.create(new_product("B01")).await.unwrap();

    let err = service(&worker, &store)
        .list(&list_request("B01"), 1)
        .await
        .unwrap_err();

    match &err {
        Error::DuplicateListing {
            source_id,
            listing_id,
        } => {
            assert_eq!(source_id, "B01");
            assert_eq!(listing_id.as_deref(), Some("110554"));
        }
        other => panic!("expected duplicate listing, got {other:?}"),
    }
    assert!(err.is_divergent());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn listing_id_clash_is_not_reported_as_a_duplicate_product() {
    let worker = ScriptedWorker::new().succeed(payloads::ebay_listing("L-B01"));
    let store = MemoryProductStore::new();
    store.create(new_product("B01")).await.unwrap();

    let err = service(&worker, &store)
        .list(&list_request("B02"), 1)
        .await
        .unwrap_err();

    match &err {
        Error::PersistenceAfterSideEffect {
            source_id,
            listing_id,
            cause,
        } => {
            assert_eq!(source_id, "B02");
            assert_eq!(listing_id, "L-B01");
            assert!(cause.violates_unique("listing_id"));
        }
        other => panic!("expected persistence failure, got {other:?}"),
    }
    assert!(err.is_divergent());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn save_failure_after_listing_reports_divergence() {
    let worker = ScriptedWorker::new().succeed(payloads::ebay_listing("110555"));
    let store = MemoryProductStore::new();
    store.fail_writes("database is locked");

    let err = service(&worker, &store)
        .list(&list_request("B01"), 1)
        .await
        .unwrap_err();

    match &err {
        Error::PersistenceAfterSideEffect {
            source_id,
            listing_id,
            cause,
        } => {
            assert_eq!(source_id, "B01");
            assert_eq!(listing_id, "110555");
            assert!(matches!(**cause, Error::Database(_)));
        }
        other => panic!("expected persistence failure, got {other:?}"),
    }
    assert!(err.to_string().contains("110555"));
}

// -------------------------------------------------------------------------
// check_profitability
// -------------------------------------------------------------------------

#[tokio::test]
async fn explicit_cost_skips_the_worker() {
    let worker = ScriptedWorker::new();
    let store = MemoryProductStore::new();

    let report = service(&worker, &store)
        .check_profitability(&CheckProfitabilityRequest {
            source_id: Some("B01".into()),
            cost_price: Some(dec!(50)),
        })
        .await
        .unwrap();

    let figures = &report.figures;
    assert_eq!(figures.list_price, dec!(57.50));
    assert_eq!(figures.marketplace_fee, dec!(5.75));
    assert_eq!(figures.payment_processing_fee, dec!(1.97));
    assert_eq!(figures.net_profit, dec!(-0.22));
    assert_eq!(figures.roi_percent, dec!(-0.44));
    assert!(report.product_details.is_none());
    assert_eq!(worker.call_count(), 0);
}

#[tokio::test]
async fn live_price_gives_the_same_figures_as_an_explicit_cost() {
    let worker = ScriptedWorker::new().succeed(payloads::price_check(50.0));
    let store = MemoryProductStore::new();
    let service = service(&worker, &store);

    let live = service
        .check_profitability(&CheckProfitabilityRequest {
            source_id: Some("B07XJ8C8F5".into()),
            cost_price: None,
        })
        .await
        .unwrap();
    let explicit = service
        .check_profitability(&CheckProfitabilityRequest {
            source_id: Some("B07XJ8C8F5".into()),
            cost_price: Some(dec!(50)),
        })
        .await
        .unwrap();

    assert_eq!(live.figures, explicit.figures);
    assert_eq!(
        live.product_details.as_ref().map(|d| d["title"].clone()),
        Some(json!("Adjustable LED desk lamp"))
    );
    assert_eq!(worker.requests()[0].operation(), WorkerOperation::CheckPrice);
    assert_eq!(
        worker.requests()[0].to_args(),
        args(&["--product-id", "B07XJ8C8F5"])
    );
    assert_eq!(worker.call_count(), 1);
}

#[tokio::test]
async fn zero_live_price_is_invalid_input() {
    let worker = ScriptedWorker::new().succeed(payloads::price_check(0.0));
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .check_profitability(&CheckProfitabilityRequest {
            source_id: Some("B01".into()),
            cost_price: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidInput(DomainError::NonPositiveCost { .. })
    ));
}

#[tokio::test]
async fn profitability_requires_a_source_id() {
    let worker = ScriptedWorker::new();
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .check_profitability(&CheckProfitabilityRequest {
            source_id: None,
            cost_price: Some(dec!(10)),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn oversized_cost_is_invalid_input() {
    let worker = ScriptedWorker::new();
    let store = MemoryProductStore::new();

    let err = service(&worker, &store)
        .check_profitability(&CheckProfitabilityRequest {
            source_id: Some("B07XJ8C8F5".into()),
            cost_price: Some(rust_decimal::Decimal::MAX),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidInput(DomainError::Overflow { .. })
    ));
}

#[tokio::test]
async fn configured_timeout_reaches_the_worker() {
    let worker = ScriptedWorker::new().succeed(payloads::price_check(20.0));
    let store = MemoryProductStore::new();
    let settings = ArbitrageSettings {
        worker_timeout: Duration::from_secs(7),
        ..ArbitrageSettings::default()
    };

    ArbitrageService::new(worker.clone(), store, settings)
        .check_profitability(&CheckProfitabilityRequest {
            source_id: Some("B07XJ8C8F5".into()),
            cost_price: None,
        })
        .await
        .unwrap();

    assert_eq!(worker.timeouts(), vec![Duration::from_secs(7)]);
}
