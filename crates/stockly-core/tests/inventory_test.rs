#![allow(clippy::unwrap_used)]
// End-to-end tests for `Inventory`: cache, views and mutations against a
// mocked inventory API.

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockly_core::form::Field;
use stockly_core::view::{RETRY_HINT, views};
use stockly_core::{
    Command, CoreError, Filters, Inventory, InventoryConfig, ProductForm, ProductPayload,
    QueryCache, RecordId, Resource, StatusColor, ViewState,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Inventory) {
    let server = MockServer::start().await;
    let url = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
    let inventory = Inventory::new(InventoryConfig::new(url), QueryCache::new()).unwrap();
    (server, inventory)
}

fn api_path(suffix: &str) -> String {
    format!("/api/v1/{suffix}")
}

fn product_json(id: i64, name: &str, qty: i64) -> Value {
    json!({
        "id": id, "sku": format!("SKU-{id}"), "name": name, "category": "home",
        "price": 10.0, "stock_quantity": qty, "min_stock_level": 5, "status": "active"
    })
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

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_filtered_products_render_two_green_active_rows() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/products")))
        .and(query_param("search", "blue"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(vec![
            product_json(1, "Blue Mug", 3),
            product_json(2, "Blue Plate", 40),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let view = views::products(Filters::new().with("search", "blue").with("status", "active"));
    let mut handle = inventory.watch_view(&view);
    let state = handle.settled().await;

    let ViewState::Table { rows, footer, .. } = view.render(&state) else {
        panic!("expected a table");
    };
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row[4].text, "active");
        assert_eq!(row[4].tone, Some(StatusColor::Green));
    }
    // 3 <= 5 is low stock; 40 is not.
    assert_eq!(rows[0][3].marker.as_deref(), Some("Low Stock"));
    assert_eq!(rows[1][3].marker, None);
    assert_eq!(footer.unwrap().showing, "Showing 1 to 2 of 2 results");
}

#[tokio::test]
async fn test_views_sharing_a_key_share_one_request() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/warehouses")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "success": true,
                    "data": [{ "id": 1, "name": "Main", "total_capacity": 100, "used_capacity": 95 }]
                }))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = views::warehouses();
    let mut a = inventory.watch_view(&view);
    let mut b = inventory.watch_view(&view);
    let (sa, sb) = tokio::join!(a.settled(), b.settled());

    assert_eq!(sa.data().unwrap().len(), 1);
    assert_eq!(sb.data().unwrap().len(), 1);
    assert_eq!(inventory.cache().observer_count(&view.key()), 2);

    let ViewState::Table { rows, .. } = view.render(&sa) else {
        panic!("expected a table");
    };
    assert_eq!(rows[0][2].text, "95/100 units");
    assert_eq!(rows[0][3].tone, Some(StatusColor::Red));
}

#[tokio::test]
async fn test_empty_collection_renders_placeholder() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/batch-numbers")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .mount(&server)
        .await;

    let view = views::batch_numbers();
    let state = inventory.watch_view(&view).settled().await;
    assert!(matches!(
        view.render(&state),
        ViewState::Empty { title, .. } if title == "No batch numbers found"
    ));
}

#[tokio::test]
async fn test_fetch_failure_renders_error_state() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/stock/movements")))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database unavailable" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = views::movements();
    let state = inventory.watch_view(&view).settled().await;
    match view.render(&state) {
        ViewState::Error {
            message,
            retry_hint,
        } => {
            assert!(message.contains("database unavailable"), "{message}");
            assert_eq!(retry_hint, RETRY_HINT);
        }
        other => panic!("expected error state, got {other:?}"),
    }
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_confirmed_delete_issues_one_call_and_one_invalidation() {
    let (server, inventory) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("inventory/products/7")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = inventory
        .delete_product(RecordId::Numeric(7), || true)
        .await
        .unwrap();

    assert!(deleted);
    assert_eq!(inventory.cache().invalidations_of(Resource::Products), 1);
}

#[tokio::test]
async fn test_declined_delete_makes_no_calls() {
    let (server, inventory) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let deleted = inventory
        .delete_product(RecordId::Numeric(7), || false)
        .await
        .unwrap();

    assert!(!deleted);
    assert_eq!(inventory.cache().stats().invalidations, 0);
}

#[tokio::test]
async fn test_created_product_appears_once_in_next_list() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_page(vec![])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("inventory/products")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(products_page(vec![product_json(17, "Desk Lamp", 12)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("inventory/products")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": product_json(17, "Desk Lamp", 12)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let view = views::products(Filters::new());
    let mut handle = inventory.watch_view(&view);
    assert!(handle.settled().await.data().unwrap().is_empty());

    let mut form = ProductForm::create();
    form.draft.set(Field::Name, "Desk Lamp");
    form.draft.set(Field::Sku, "SKU-17");
    form.draft.set(Field::Category, "home");
    form.draft.set(Field::Price, "10");
    form.draft.set(Field::StockQuantity, "12");
    let created = form.submit(&inventory).await.unwrap();
    assert_eq!(created.id, RecordId::Numeric(17));

    // Invalidation already refetched the observed list.
    let state = handle.state();
    let items = &state.data().unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Desk Lamp");
}

#[tokio::test]
async fn test_failed_submit_keeps_draft_and_cache() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/products")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(products_page(vec![product_json(1, "Mug", 9)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("inventory/products")))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "SKU already exists" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let view = views::products(Filters::new());
    let mut handle = inventory.watch_view(&view);
    handle.settled().await;

    let mut form = ProductForm::create();
    form.draft.set(Field::Name, "Mug");
    form.draft.set(Field::Sku, "SKU-1");
    form.draft.set(Field::Category, "home");
    let before = form.draft.clone();

    let err = form.submit(&inventory).await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(form.draft, before);
    assert_eq!(inventory.cache().stats().invalidations, 0);
    assert_eq!(handle.state().data().unwrap().len(), 1);
}

#[tokio::test]
async fn test_validation_failures_never_reach_the_network() {
    let (server, inventory) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = inventory
        .execute(Command::UpdateProduct {
            id: RecordId::Numeric(3),
            payload: ProductPayload::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));

    let form = ProductForm::create();
    let err = form.submit(&inventory).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { message } if message.contains("SKU is required")));
}

#[tokio::test]
async fn test_approving_adjustment_refetches_observed_stock_levels() {
    let (server, inventory) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("inventory/stock")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "product_id": 1, "product_name": "Mug", "quantity": 0,
                       "min_level": 5, "max_level": 50 }]
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("inventory/stock/adjust/4/approve")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": 4, "product_name": "Mug", "adjustment_type": "increase",
                      "quantity": 10, "status": "approved" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let view = views::stock_levels(Filters::new());
    let mut handle = inventory.watch_view(&view);
    let state = handle.settled().await;
    let ViewState::Table { rows, .. } = view.render(&state) else {
        panic!("expected a table");
    };
    // Status derived locally when the server omits it.
    assert_eq!(rows[0][5].text, "critical");

    inventory
        .execute(Command::ApproveAdjustment {
            id: RecordId::Numeric(4),
        })
        .await
        .unwrap();
    assert_eq!(inventory.cache().invalidations_of(Resource::StockLevels), 1);
}
