//! End-to-end order submission against a mock order server.

use axum::http::StatusCode;
use canteen_core::{LineItem, OrderId, Price};
use canteen_integration_tests::{MockOrderServer, Reply, TestPage, unreachable_base_url};
use canteen_storefront::{
    CART_STORAGE_KEY, CartStorage, CartStore, Checkout, HttpOrderGateway, MemoryStorage,
    OrderOutcome, Rejection,
};
use rust_decimal::Decimal;
use serde_json::json;
use url::Url;

fn price(amount: i64) -> Price {
    Price::new(Decimal::from(amount)).expect("valid price")
}

fn filled_store(page: TestPage) -> CartStore<MemoryStorage, TestPage> {
    let store = CartStore::new(MemoryStorage::new(), page);
    store
        .add(LineItem::new("1", "Masala Dosa", price(100)).with_quantity(2))
        .expect("add dosa");
    store
        .add(LineItem::new("2", "Filter Coffee", price(50)))
        .expect("add coffee");
    store
}

fn checkout_for(base_url: &Url) -> Checkout<HttpOrderGateway> {
    Checkout::new(HttpOrderGateway::new(base_url).expect("gateway"))
}

#[tokio::test]
async fn test_successful_order_clears_cart_and_navigates() {
    let server = MockOrderServer::spawn(Reply::placed(json!("A17"))).await;
    let store = filled_store(TestPage::with_name_field("  Asha "));
    let checkout = checkout_for(server.base_url());

    let outcome = checkout.place_order(&store).await;

    assert_eq!(outcome, OrderOutcome::Placed(OrderId::new("A17")));
    assert!(store.storage().get_item(CART_STORAGE_KEY).is_none());
    assert_eq!(store.page().last_badge().map(|b| b.count), Some(0));
    assert_eq!(store.page().navigations(), vec!["/bill/A17".to_string()]);
    assert!(store.page().alerts().is_empty());
}

#[tokio::test]
async fn test_request_body_shape() {
    let server = MockOrderServer::spawn(Reply::placed(json!(7))).await;
    let store = filled_store(TestPage::with_name_field("  Asha "));
    let checkout = checkout_for(server.base_url());

    checkout.place_order(&store).await;

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests.first(),
        Some(&json!({
            "customer_name": "Asha",
            "items": [
                { "id": "1", "name": "Masala Dosa", "price": 100.0, "quantity": 2, "total": 200.0 },
                { "id": "2", "name": "Filter Coffee", "price": 50.0, "quantity": 1, "total": 50.0 }
            ],
            "subtotal": 250.0,
            "tax": 12.5,
            "total": 262.5
        }))
    );
}

#[tokio::test]
async fn test_numeric_order_id_navigates() {
    let server = MockOrderServer::spawn(Reply::placed(json!(42))).await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(server.base_url());

    let outcome = checkout.place_order(&store).await;

    assert_eq!(outcome, OrderOutcome::Placed(OrderId::new("42")));
    assert_eq!(store.page().navigations(), vec!["/bill/42".to_string()]);
}

#[tokio::test]
async fn test_page_without_name_field_omits_customer_name() {
    let server = MockOrderServer::spawn(Reply::placed(json!("B2"))).await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(server.base_url());

    checkout.place_order(&store).await;

    let requests = server.requests().await;
    let body = requests.first().expect("one request");
    assert!(body.get("customer_name").is_none());
}

#[tokio::test]
async fn test_declined_order_keeps_cart() {
    let server = MockOrderServer::spawn(Reply::declined()).await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(server.base_url());

    let outcome = checkout.place_order(&store).await;

    assert_eq!(outcome, OrderOutcome::Failed);
    assert_eq!(store.load().len(), 2);
    assert_eq!(
        store.page().alerts(),
        vec!["Failed to place order. Please try again.".to_string()]
    );
    assert!(store.page().navigations().is_empty());
}

#[tokio::test]
async fn test_server_error_keeps_cart() {
    let server = MockOrderServer::spawn(Reply::Json(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "kitchen closed" }),
    ))
    .await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(server.base_url());

    let outcome = checkout.place_order(&store).await;

    assert_eq!(outcome, OrderOutcome::Failed);
    assert_eq!(store.load().len(), 2);
    assert_eq!(
        store.page().alerts(),
        vec!["An error occurred. Please try again.".to_string()]
    );
}

#[tokio::test]
async fn test_unparseable_reply_keeps_cart() {
    let server = MockOrderServer::spawn(Reply::Garbage).await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(server.base_url());

    let outcome = checkout.place_order(&store).await;

    assert_eq!(outcome, OrderOutcome::Failed);
    assert_eq!(store.load().len(), 2);
    assert_eq!(
        store.page().alerts(),
        vec!["An error occurred. Please try again.".to_string()]
    );
}

#[tokio::test]
async fn test_unreachable_server_keeps_cart() {
    let base_url = unreachable_base_url().await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(&base_url);

    let outcome = checkout.place_order(&store).await;

    assert_eq!(outcome, OrderOutcome::Failed);
    assert_eq!(store.load().len(), 2);
    assert_eq!(
        store.page().alerts(),
        vec!["An error occurred. Please try again.".to_string()]
    );
}

#[tokio::test]
async fn test_rejections_send_nothing() {
    let server = MockOrderServer::spawn(Reply::placed(json!("X"))).await;
    let checkout = checkout_for(server.base_url());

    let empty = CartStore::new(MemoryStorage::new(), TestPage::new());
    assert_eq!(
        checkout.place_order(&empty).await,
        OrderOutcome::Rejected(Rejection::EmptyCart)
    );

    let unnamed = filled_store(TestPage::with_name_field("   "));
    assert_eq!(
        checkout.place_order(&unnamed).await,
        OrderOutcome::Rejected(Rejection::MissingCustomerName)
    );
    assert_eq!(unnamed.load().len(), 2);

    assert!(server.requests().await.is_empty());
}

#[tokio::test]
async fn test_checkout_is_reusable_after_failure() {
    let server = MockOrderServer::spawn(Reply::declined()).await;
    let store = filled_store(TestPage::new());
    let checkout = checkout_for(server.base_url());

    assert_eq!(checkout.place_order(&store).await, OrderOutcome::Failed);
    assert_eq!(checkout.place_order(&store).await, OrderOutcome::Failed);
    assert_eq!(server.requests().await.len(), 2);
}
