// Client wiring without a live backend

use cater_client::{ClientConfig, ClientError, HttpClient, checkout, session};
use cater_core::cart::{CatalogSelection, FileCartStorage, PricedSelection};
use cater_core::{AppState, Cart};
use chrono::NaiveDate;
use serde_json::Value;
use shared::models::EntryId;
use shared::order::{CustomerDetails, PaymentMethod};
use tempfile::TempDir;

/// Nothing listens on the discard port
fn offline_client() -> HttpClient {
    ClientConfig::new("http://127.0.0.1:9")
        .with_timeout(2)
        .with_token("tok")
        .build_http_client()
        .unwrap()
}

fn file_cart(dir: &TempDir) -> Cart {
    Cart::new(Box::new(FileCartStorage::new(dir.path(), "cart.json")))
}

fn samosa() -> PricedSelection {
    PricedSelection::Catalog(CatalogSelection {
        menu_id: 1,
        menu_date: NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
        entry: EntryId::Item(11),
        name: "Samosa".to_string(),
        category: "Snacks".to_string(),
        unit_price: 1.75,
        combo_items: Vec::new(),
    })
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let temp_dir = TempDir::new().unwrap();
    let mut cart = file_cart(&temp_dir);
    cart.add(samosa(), 4, Value::Null);

    let client = offline_client();
    let mut state = AppState::new(cart);
    state.sign_in("tok", None);

    let err = checkout(
        &client,
        &mut state,
        cater_client::CheckoutRequest {
            customer: CustomerDetails {
                customer_name: "Asha".into(),
                customer_email: "asha@example.com".into(),
                ..Default::default()
            },
            payment_method: PaymentMethod::Offline,
            delivery_date: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(state.is_authenticated());

    // the stored cart is still there for a retry
    let restored = file_cart(&temp_dir);
    assert_eq!(restored.item_count(), 4);
    assert_eq!(restored.total(), 7.0);
}

#[tokio::test]
async fn test_network_failure_maps_to_network_code() {
    let client = offline_client();
    let err = client.health().await.unwrap_err();
    assert_eq!(err.code(), shared::ErrorCode::NetworkError);
    // a transport failure is not a rejection of the token
    assert_eq!(client.token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_sign_out_keeps_cart() {
    let temp_dir = TempDir::new().unwrap();
    let mut cart = file_cart(&temp_dir);
    cart.add(samosa(), 1, Value::Null);

    let client = offline_client();
    let mut state = AppState::new(cart);
    state.sign_in("tok", None);
    session::sign_out(&client, &mut state);

    assert!(!client.is_authenticated());
    assert_eq!(state.cart().item_count(), 1);
}
