//! Menu → cart → checkout payload → stored order → kitchen manifest

use cater_core::cart::{FileCartStorage, PricedSelection};
use cater_core::menu_guard::ensure_menu_editable;
use cater_core::{Cart, PreparationManifest};
use chrono::NaiveDate;
use serde_json::{Value, json};
use shared::models::{
    Catalog, CatalogEntry, CatalogItem, Combo, ComboComponentRef, EntryId, MenuEntry,
    ScheduledMenu,
};
use shared::order::{CustomerDetails, Order, PaymentMethod};
use shared::ErrorCode;
use tempfile::TempDir;

fn menu_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()
}

fn item(id: i64, name: &str, price: f64) -> CatalogEntry {
    CatalogEntry::Item(CatalogItem {
        id,
        name: name.to_string(),
        description: None,
        category: "Mains".to_string(),
        price,
        is_active: true,
    })
}

fn catalog() -> Catalog {
    Catalog::new([
        item(1, "Paneer Tikka", 6.0),
        item(2, "Naan", 1.5),
        item(3, "Gulab Jamun", 3.0),
        CatalogEntry::Combo(Combo {
            id: 10,
            name: "Thali".to_string(),
            description: None,
            category: "Combos".to_string(),
            price: 12.0,
            items: vec![
                ComboComponentRef {
                    menu_item_id: 1,
                    quantity: 1,
                },
                ComboComponentRef {
                    menu_item_id: 2,
                    quantity: 3,
                },
            ],
            is_active: true,
        }),
    ])
}

fn menu() -> ScheduledMenu {
    let entry = |entry: EntryId, name: &str, price: f64, price_override: Option<f64>| MenuEntry {
        entry,
        name: name.to_string(),
        category: String::new(),
        catalog_price: price,
        price_override,
    };
    ScheduledMenu {
        id: 4,
        name: "Friday Lunch".to_string(),
        date: menu_date(),
        is_active: true,
        description: None,
        entries: vec![
            entry(EntryId::Combo(10), "Thali", 12.0, Some(11.0)),
            entry(EntryId::Item(3), "Gulab Jamun", 3.0, None),
        ],
    }
}

/// What the backend hands back for a created order
fn stored_order(id: i64, status: &str, items: &Value) -> Order {
    serde_json::from_value(json!({
        "order_id": id,
        "customer_name": "Asha",
        "customer_email": "asha@example.com",
        "menu_id": 4,
        "menu_date": menu_date(),
        "delivery_date": menu_date(),
        "status": status,
        "total_amount": 25.0,
        // the backend stores the mapping as a JSON string
        "items": items.to_string(),
    }))
    .unwrap()
}

#[test]
fn test_file_cart_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = catalog();
    let menu = menu();

    let line_id = {
        let mut cart = Cart::new(Box::new(FileCartStorage::new(temp_dir.path(), "cart.json")));
        cart.select_menu(menu.clone());
        let selection = PricedSelection::menu_entry(&menu, EntryId::Combo(10), &catalog).unwrap();
        cart.add(selection, 2, Value::Null)
    };

    let cart = Cart::new(Box::new(FileCartStorage::new(temp_dir.path(), "cart.json")));
    assert_eq!(cart.line(&line_id).map(|l| l.quantity), Some(2));
    assert_eq!(cart.selected_menu().map(|m| m.id), Some(4));
    assert_eq!(cart.total(), 22.0);
}

#[test]
fn test_corrupt_cart_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("cart.json"), "not a cart").unwrap();
    let cart = Cart::new(Box::new(FileCartStorage::new(temp_dir.path(), "cart.json")));
    assert!(cart.is_empty());
}

#[test]
fn test_checkout_to_manifest() {
    let catalog = catalog();
    let menu = menu();
    let mut cart = Cart::in_memory();

    let thali = PricedSelection::menu_entry(&menu, EntryId::Combo(10), &catalog).unwrap();
    cart.add(thali.clone(), 1, Value::Null);
    cart.add(thali, 1, Value::Null);
    let dessert = PricedSelection::menu_entry(&menu, EntryId::Item(3), &catalog).unwrap();
    cart.add(dessert, 1, json!({"note": "extra syrup"}));
    assert_eq!(cart.total(), 25.0);

    let customer = CustomerDetails {
        customer_name: "Asha".to_string(),
        customer_email: "asha@example.com".to_string(),
        ..Default::default()
    };
    let payload = cart
        .to_order_create(customer, PaymentMethod::Offline, None)
        .unwrap();
    assert_eq!(payload.delivery_date, menu_date());
    let items = serde_json::to_value(&payload.items).unwrap();

    let orders = vec![
        stored_order(1, "pending", &items),
        stored_order(2, "cancelled", &items),
    ];
    let manifest = PreparationManifest::for_menu_date(&orders, menu_date());
    assert_eq!(manifest.get("Paneer Tikka"), 2);
    assert_eq!(manifest.get("Naan"), 6);
    assert_eq!(manifest.get("Gulab Jamun"), 1);
    assert_eq!(manifest.total_portions(), 9);
    assert_eq!(manifest.unique_item_count(), 3);

    let err = ensure_menu_editable(&menu, &orders).unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuHasOrders);
}

#[test]
fn test_whole_menu_line_flattens_on_checkout() {
    let catalog = catalog();
    let menu = menu();
    let mut cart = Cart::in_memory();
    cart.add(PricedSelection::whole_menu(&menu, &catalog).unwrap(), 3, Value::Null);
    // (11.0 + 3.0) * 3
    assert_eq!(cart.total(), 42.0);

    let payload = cart
        .to_order_create(
            CustomerDetails {
                customer_name: "Ravi".to_string(),
                customer_email: "ravi@example.com".to_string(),
                ..Default::default()
            },
            PaymentMethod::Online,
            None,
        )
        .unwrap();
    assert_eq!(payload.items.len(), 2);

    let items = serde_json::to_value(&payload.items).unwrap();
    let manifest = PreparationManifest::from_orders(&[stored_order(9, "confirmed", &items)]);
    assert_eq!(manifest.get("Paneer Tikka"), 3);
    assert_eq!(manifest.get("Naan"), 9);
    assert_eq!(manifest.get("Gulab Jamun"), 3);
}
