//! Freezing the cart into an order payload

use super::{Cart, CartLine, PricedSelection};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::EntryId;
use shared::order::{CustomerDetails, OrderCreate, OrderItemEntry, PaymentMethod};
use std::collections::BTreeMap;

impl Cart {
    /// Build the checkout payload
    ///
    /// All lines must come from the same menu date. `delivery_date` defaults
    /// to that date. Whole-menu lines are flattened into one entry per nested
    /// item, each carrying the line quantity.
    pub fn to_order_create(
        &self,
        customer: CustomerDetails,
        payment_method: PaymentMethod,
        delivery_date: Option<NaiveDate>,
    ) -> AppResult<OrderCreate> {
        customer.validate()?;

        let first = self
            .lines()
            .first()
            .ok_or_else(|| AppError::new(ErrorCode::OrderEmpty))?;
        let menu_date = first.selection.menu_date();
        if let Some(other) = self
            .lines()
            .iter()
            .find(|l| l.selection.menu_date() != menu_date)
        {
            return Err(AppError::validation(
                "Cart contains items from more than one menu date",
            )
            .with_detail("menu_date", menu_date.to_string())
            .with_detail("other_menu_date", other.selection.menu_date().to_string()));
        }

        let mut items = BTreeMap::new();
        for line in self.lines() {
            freeze_line(line, &mut items);
        }

        Ok(OrderCreate {
            customer,
            menu_date,
            delivery_date: delivery_date.unwrap_or(menu_date),
            payment_method,
            total: self.total(),
            items,
        })
    }
}

fn freeze_line(line: &CartLine, items: &mut BTreeMap<String, OrderItemEntry>) {
    match &line.selection {
        PricedSelection::Catalog(entry) => {
            let (menu_item_id, combo_id) = split_entry_id(entry.entry);
            items.insert(
                line.id.clone(),
                OrderItemEntry {
                    menu_id: Some(entry.menu_id),
                    menu_item_id,
                    combo_id,
                    name: entry.name.clone(),
                    category: non_empty(&entry.category),
                    price: entry.unit_price,
                    quantity: line.quantity,
                    is_combo: combo_id.is_some(),
                    combo_items: entry.combo_items.clone(),
                    customization: line.customization.clone(),
                },
            );
        }
        PricedSelection::Menu(menu) => {
            for (idx, item) in menu.items.iter().enumerate() {
                let (menu_item_id, combo_id) = split_entry_id(item.entry);
                items.insert(
                    format!("{}-{}", line.id, idx),
                    OrderItemEntry {
                        menu_id: Some(menu.menu_id),
                        menu_item_id,
                        combo_id,
                        name: item.name.clone(),
                        category: non_empty(&item.category),
                        price: item.price,
                        quantity: line.quantity,
                        is_combo: combo_id.is_some(),
                        combo_items: item.combo_items.clone(),
                        customization: line.customization.clone(),
                    },
                );
            }
        }
    }
}

fn split_entry_id(id: EntryId) -> (Option<i64>, Option<i64>) {
    match id {
        EntryId::Item(id) => (Some(id), None),
        EntryId::Combo(id) => (None, Some(id)),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CatalogSelection, MenuSelection, MenuSelectionItem};
    use serde_json::Value;
    use shared::order::{ComboItemEntry, parse_order_items};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            customer_name: "Meera".into(),
            customer_email: "meera@example.com".into(),
            ..Default::default()
        }
    }

    fn combo_line(day: u32) -> PricedSelection {
        PricedSelection::Catalog(CatalogSelection {
            menu_id: i64::from(day),
            menu_date: date(day),
            entry: EntryId::Combo(7),
            name: "Thali".into(),
            category: "Combos".into(),
            unit_price: 12.0,
            combo_items: vec![
                ComboItemEntry {
                    menu_item_id: 1,
                    menu_item_name: "A".into(),
                    quantity: 1,
                },
                ComboItemEntry {
                    menu_item_id: 2,
                    menu_item_name: "B".into(),
                    quantity: 3,
                },
            ],
        })
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::in_memory();
        let err = cart
            .to_order_create(customer(), PaymentMethod::Online, None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_mixed_menu_dates_rejected() {
        let mut cart = Cart::in_memory();
        cart.add(combo_line(24), 1, Value::Null);
        cart.add(combo_line(25), 1, Value::Null);
        let err = cart
            .to_order_create(customer(), PaymentMethod::Online, None)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_invalid_customer_blocks_checkout() {
        let mut cart = Cart::in_memory();
        cart.add(combo_line(24), 1, Value::Null);
        let mut bad = customer();
        bad.customer_email = "nope".into();
        assert!(cart.to_order_create(bad, PaymentMethod::Offline, None).is_err());
    }

    #[test]
    fn test_frozen_items_feed_preparation_parser() {
        let mut cart = Cart::in_memory();
        cart.add(combo_line(24), 2, Value::Null);
        cart.add(
            PricedSelection::Menu(MenuSelection {
                menu_id: 3,
                menu_name: "Friday".into(),
                menu_date: date(24),
                items: vec![MenuSelectionItem {
                    entry: EntryId::Item(9),
                    name: "C".into(),
                    category: String::new(),
                    price: 2.0,
                    combo_items: Vec::new(),
                }],
            }),
            4,
            Value::Null,
        );

        let order = cart
            .to_order_create(customer(), PaymentMethod::Offline, Some(date(25)))
            .unwrap();
        assert_eq!(order.menu_date, date(24));
        assert_eq!(order.delivery_date, date(25));
        assert_eq!(order.total, 32.0);
        assert_eq!(order.items.len(), 2);

        let raw = serde_json::to_value(&order.items).unwrap();
        let lines = parse_order_items(&raw).unwrap();
        let mut portions: Vec<(String, i64)> = lines
            .iter()
            .flat_map(|l| l.portions())
            .map(|(name, qty)| (name.to_string(), qty))
            .collect();
        portions.sort();
        assert_eq!(
            portions,
            vec![("A".into(), 2), ("B".into(), 6), ("C".into(), 4)]
        );
    }
}
