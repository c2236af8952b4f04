//! Integration tests for the `stockly` CLI binary.
//!
//! Argument parsing, help output, completions, and config handling run
//! without a server; list and mutation commands run against a mocked
//! inventory API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `stockly` binary with env isolation.
///
/// Clears all `STOCKLY_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn stockly_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("stockly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("STOCKLY_PROFILE")
        .env_remove("STOCKLY_API_URL")
        .env_remove("STOCKLY_OUTPUT")
        .env_remove("STOCKLY_COLOR")
        .env_remove("STOCKLY_QUIET")
        .env_remove("STOCKLY_YES")
        .env_remove("STOCKLY_INSECURE")
        .env_remove("STOCKLY_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let home = tempfile::tempdir().unwrap();
    let api_url = format!("{}/api/v1", server.uri());
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        let output = stockly_cmd(home.path())
            .args(["--api-url", &api_url, "--color", "never"])
            .args(&args)
            .output()
            .unwrap();
        drop(home);
        output
    })
    .await
    .unwrap()
}

fn products_page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "success": true,
        "data": {
            "products": items,
            "pagination": { "page": 1, "limit": 20, "total": total, "totalPages": 1 }
        }
    })
}

fn product_json(id: i64, name: &str, qty: i64) -> Value {
    json!({
        "id": id, "sku": format!("SKU-{id}"), "name": name, "category": "home",
        "price": 12.5, "stock_quantity": qty, "min_stock_level": 5, "status": "active"
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = stockly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    stockly_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("products")
            .and(predicate::str::contains("warehouses"))
            .and(predicate::str::contains("stock"))
            .and(predicate::str::contains("adjustments")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    stockly_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stockly"));
}

#[test]
fn test_products_get_requires_id() {
    let home = tempfile::tempdir().unwrap();
    let output = stockly_cmd(home.path())
        .args(["products", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash_and_zsh() {
    let home = tempfile::tempdir().unwrap();
    for shell in ["bash", "zsh"] {
        stockly_cmd(home.path())
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("stockly"));
    }
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();
    stockly_cmd(home.path())
        .args(["config", "init", "--name", "local", "--url", "http://inventory.local/api/v1"])
        .assert()
        .success();

    let output = stockly_cmd(home.path())
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let cfg: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["default_profile"], "local");
    assert_eq!(
        cfg["profiles"]["local"]["api_url"],
        "http://inventory.local/api/v1/"
    );
}

#[test]
fn test_config_init_rejects_bad_url() {
    let home = tempfile::tempdir().unwrap();
    let output = stockly_cmd(home.path())
        .args(["config", "init", "--name", "x", "--url", "ftp://nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_set_default_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = stockly_cmd(home.path())
        .args(["config", "set-default", "prod"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("not found"));
}

#[test]
fn test_unknown_profile_flag_fails_before_network() {
    let home = tempfile::tempdir().unwrap();
    let output = stockly_cmd(home.path())
        .args(["--profile", "prod", "warehouses", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Lists ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_renders_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/products"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(vec![
            product_json(1, "Blue Mug", 3),
            product_json(2, "Blue Plate", 40),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "list"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Blue Mug"));
    assert!(stdout.contains("SKU-1"));
    assert!(stdout.contains("(Low Stock)"));
    assert!(stdout.contains("$12.50"));
    assert!(stdout.contains("Showing 1 to 2 of 2 results"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_plain_emits_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/products"))
        .and(query_param("search", "mug"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(vec![
            product_json(1, "Blue Mug", 3),
            product_json(7, "Red Mug", 9),
        ])))
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "list", "-s", "mug", "-o", "plain"]).await;
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1\n7");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_warehouses_show_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/warehouses"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["warehouses", "list"]).await;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No warehouses found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/inventory/stock/movements"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database unavailable" })),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["movements", "list"]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("database unavailable"));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_yes_is_refused_non_interactively() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "delete", "7"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_issues_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/inventory/products/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "delete", "7", "--yes"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Deleted product 7"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "create", "--name", "Lamp"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("SKU is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_rejects_out_of_range_fields_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cases: [&[&str]; 4] = [
        &["products", "update", "7", "--stock", "-5"],
        &["products", "update", "7", "--price=-3"],
        &["products", "update", "7", "--min-stock", "-1"],
        &["products", "update", "7", "--status", "discontinued"],
    ];
    for args in cases {
        let output = run_against(&server, args).await;
        assert_eq!(output.status.code(), Some(2), "{args:?}: {}", combined_output(&output));
    }

    let output = run_against(&server, &["products", "update", "7", "--status", "discontinued"]).await;
    assert!(combined_output(&output).contains("Status must be active or inactive"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_sku_maps_to_conflict_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/inventory/products"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "SKU already exists" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "products", "create", "--name", "Lamp", "--sku", "L-1", "--category", "home",
            "--price", "10",
        ],
    )
    .await;
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("SKU already exists"));
}
