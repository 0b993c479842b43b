//! End-to-end runs of the `flipdesk` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Workspace with a config pointing at a fresh database and a search worker
/// that prints a fixed candidate list.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("flipdesk.db");
        let config = format!(
            r#"
[logging]
level = "warn"

[database]
url = "{db}"

[worker]
timeout_secs = 10

[worker.search]
program = "sh"
args = ["-c", "echo '[{{\"asin\":\"B07XJ8C8F5\",\"title\":\"Desk lamp\",\"price\":20.0}}]'", "search"]

[worker.list]
program = "sh"
args = ["-c", "exit 1", "list"]

[worker.check_price]
program = "sh"
args = ["-c", "echo '{{\"price\":50}}'", "check_price"]
"#,
            db = db.display()
        );
        fs::write(dir.path().join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn flipdesk(&self) -> Command {
        let mut cmd = Command::cargo_bin("flipdesk").unwrap();
        cmd.current_dir(self.path())
            .env_remove("FLIPDESK_DATABASE_URL")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config());
        cmd
    }
}

#[test]
fn profit_with_explicit_cost_prints_figures() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args(["--json", "profit", "--source-id", "B07XJ8C8F5", "--cost-price", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\":\"profit\""))
        .stdout(predicate::str::contains("57.50"))
        .stdout(predicate::str::contains("-0.22"));
}

#[test]
fn profit_resolves_live_price_through_worker() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args(["--json", "profit", "--source-id", "B07XJ8C8F5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("57.50"))
        .stdout(predicate::str::contains("productDetails"));
}

#[test]
fn search_returns_worker_candidates() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args(["--json", "search", "desk lamp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":1"))
        .stdout(predicate::str::contains("B07XJ8C8F5"));
}

#[test]
fn failed_listing_exits_nonzero_and_records_nothing() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args(["--json", "list", "--source-id", "B07XJ8C8F5", "--markup", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"kind\":\"worker_execution\""));

    ws.flipdesk()
        .args(["--json", "products"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":0"));
}

#[test]
fn stats_on_empty_database() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args(["--json", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalProducts\":0"))
        .stdout(predicate::str::contains("\"recentListings\":[]"));
}

#[test]
fn stats_renders_for_humans() {
    let ws = Workspace::new();
    ws.flipdesk()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Products"));
}

#[test]
fn recording_order_for_unknown_product_fails() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args([
            "--json",
            "orders",
            "record",
            "--order-id",
            "12-34567-89012",
            "--product-id",
            "42",
            "--buyer-name",
            "Ada Buyer",
            "--buyer-email",
            "ada@example.com",
            "--total",
            "30.00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"kind\":\"not_found\""));
}

#[test]
fn missing_keywords_is_a_usage_error() {
    let ws = Workspace::new();
    ws.flipdesk().arg("search").assert().failure();
}

#[test]
fn invalid_config_exits_nonzero() {
    let ws = Workspace::new();
    fs::write(ws.config(), "[pricing]\nmarketplace_fee_rate = 1.5\n").unwrap();

    ws.flipdesk()
        .args(["--json", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"kind\":\"config\""))
        .stderr(predicate::str::contains("marketplace_fee_rate"));
}

#[test]
fn database_url_can_come_from_environment() {
    let ws = Workspace::new();
    let other = ws.path().join("other.db");
    ws.flipdesk()
        .env("FLIPDESK_DATABASE_URL", &other)
        .args(["--json", "products"])
        .assert()
        .success();

    assert!(other.exists());
}

#[test]
fn status_reports_database_and_workers() {
    let ws = Workspace::new();
    ws.flipdesk()
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"configFound\":true"))
        .stdout(predicate::str::contains("\"workers\""))
        .stdout(predicate::str::contains("check_price"));
}
