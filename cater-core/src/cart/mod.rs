//! Customer cart
//!
//! Lines are unique by `(menu, catalog entry, customization)`: adding the
//! same selection again bumps the quantity instead of appending a line.
//! Every mutation is persisted through the configured [`CartStorage`];
//! a failed save is logged and never surfaces to the caller.

mod checkout;
mod selection;
mod storage;

pub use selection::{CatalogSelection, MenuSelection, MenuSelectionItem, PricedSelection};
pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage};

use crate::money::{line_total, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{EntryId, ScheduledMenu};
use shared::order::Order;
use tracing::{debug, warn};

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Local identifier, not known to the backend
    pub id: String,
    pub selection: PricedSelection,
    pub quantity: i32,
    /// Free-form options; an empty object is stored as `null`
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub customization: Value,
}

impl CartLine {
    pub fn unit_price(&self) -> Decimal {
        self.selection.unit_price()
    }

    pub fn line_total(&self) -> Decimal {
        line_total(self.unit_price(), self.quantity)
    }

    fn matches(&self, menu_id: i64, entry: Option<EntryId>, customization: &Value) -> bool {
        self.selection.menu_id() == menu_id
            && self.selection.entry() == entry
            && &self.customization == customization
    }
}

/// Persisted cart contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_menu: Option<ScheduledMenu>,
    /// Order already created from these lines, still waiting on payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_order: Option<Order>,
}

#[derive(Debug)]
pub struct Cart {
    state: CartState,
    storage: Box<dyn CartStorage>,
}

impl Cart {
    /// Open a cart, restoring whatever the storage holds
    ///
    /// Unreadable stored state degrades to an empty cart.
    pub fn new(storage: Box<dyn CartStorage>) -> Self {
        let state = match storage.load() {
            Ok(state) => state.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored cart");
                CartState::default()
            }
        };
        Self { state, storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryCartStorage::default()))
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.state.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.state.lines.iter().find(|l| l.id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.state.lines.is_empty()
    }

    /// Sum of quantities across lines
    pub fn item_count(&self) -> i64 {
        self.state.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    /// Add a selection; returns the id of the line that now holds it
    ///
    /// Non-positive quantities count as 1.
    pub fn add(&mut self, selection: PricedSelection, quantity: i32, customization: Value) -> String {
        let quantity = quantity.max(1);
        let customization = normalize_customization(customization);
        let menu_id = selection.menu_id();
        let entry = selection.entry();

        let line_id = match self
            .state
            .lines
            .iter_mut()
            .find(|l| l.matches(menu_id, entry, &customization))
        {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                debug!(line_id = %line.id, quantity = line.quantity, "Cart line incremented");
                line.id.clone()
            }
            None => {
                let line = CartLine {
                    id: uuid::Uuid::new_v4().to_string(),
                    selection,
                    quantity,
                    customization,
                };
                debug!(line_id = %line.id, name = line.selection.display_name(), quantity, "Cart line added");
                let id = line.id.clone();
                self.state.lines.push(line);
                id
            }
        };

        self.drop_pending_order();
        self.persist();
        line_id
    }

    /// Remove a line; unknown ids are ignored
    pub fn remove(&mut self, line_id: &str) {
        let before = self.state.lines.len();
        self.state.lines.retain(|l| l.id != line_id);
        if self.state.lines.len() != before {
            debug!(line_id, "Cart line removed");
            self.drop_pending_order();
            self.persist();
        }
    }

    /// Overwrite a line's quantity; `qty <= 0` removes the line
    pub fn set_quantity(&mut self, line_id: &str, qty: i32) {
        if qty <= 0 {
            self.remove(line_id);
            return;
        }
        if let Some(line) = self.state.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = qty;
            debug!(line_id, quantity = qty, "Cart line quantity set");
            self.drop_pending_order();
            self.persist();
        }
    }

    /// Exact total
    pub fn total_decimal(&self) -> Decimal {
        self.state.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total rounded to cents
    pub fn total(&self) -> f64 {
        to_f64(self.total_decimal())
    }

    pub fn select_menu(&mut self, menu: ScheduledMenu) {
        self.state.selected_menu = Some(menu);
        self.persist();
    }

    pub fn selected_menu(&self) -> Option<&ScheduledMenu> {
        self.state.selected_menu.as_ref()
    }

    /// Order created from the current lines whose payment has not completed
    pub fn pending_order(&self) -> Option<&Order> {
        self.state.pending_order.as_ref()
    }

    /// Remember an unpaid order so a payment retry does not place it twice
    ///
    /// Any later change to the lines forgets it.
    pub fn set_pending_order(&mut self, order: Order) {
        debug!(order_id = order.id, "Cart awaiting payment");
        self.state.pending_order = Some(order);
        self.persist();
    }

    pub fn take_pending_order(&mut self) -> Option<Order> {
        let order = self.state.pending_order.take();
        if order.is_some() {
            self.persist();
        }
        order
    }

    fn drop_pending_order(&mut self) {
        if let Some(order) = self.state.pending_order.take() {
            warn!(order_id = order.id, "Cart changed, unpaid order no longer tracked");
        }
    }

    /// Empty the cart and forget the selected menu
    pub fn clear(&mut self) {
        self.state = CartState::default();
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear stored cart");
        }
        debug!("Cart cleared");
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

fn normalize_customization(value: Value) -> Value {
    match value {
        Value::Object(map) if map.is_empty() => Value::Null,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()
    }

    fn entry(menu_id: i64, id: EntryId, price: f64) -> PricedSelection {
        PricedSelection::Catalog(CatalogSelection {
            menu_id,
            menu_date: date(),
            entry: id,
            name: format!("{id}"),
            category: "Mains".to_string(),
            unit_price: price,
            combo_items: Vec::new(),
        })
    }

    fn whole_menu(menu_id: i64, prices: &[f64]) -> PricedSelection {
        PricedSelection::Menu(MenuSelection {
            menu_id,
            menu_name: "Friday Lunch".to_string(),
            menu_date: date(),
            items: prices
                .iter()
                .enumerate()
                .map(|(i, price)| MenuSelectionItem {
                    entry: EntryId::Item(i as i64 + 1),
                    name: format!("Dish {i}"),
                    category: "Mains".to_string(),
                    price: *price,
                    combo_items: Vec::new(),
                })
                .collect(),
        })
    }

    #[test]
    fn test_add_twice_collapses() {
        let mut cart = Cart::in_memory();
        let a = cart.add(entry(1, EntryId::Item(5), 4.0), 1, json!({}));
        let b = cart.add(entry(1, EntryId::Item(5), 4.0), 1, Value::Null);
        assert_eq!(a, b);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_identity_key_distinguishes() {
        let mut cart = Cart::in_memory();
        cart.add(entry(1, EntryId::Item(5), 4.0), 1, Value::Null);
        cart.add(entry(2, EntryId::Item(5), 4.0), 1, Value::Null);
        cart.add(entry(1, EntryId::Combo(5), 4.0), 1, Value::Null);
        cart.add(entry(1, EntryId::Item(5), 4.0), 1, json!({"spice": "mild"}));
        assert_eq!(cart.lines().len(), 4);
    }

    #[test]
    fn test_set_quantity_zero_is_remove() {
        let mut a = Cart::in_memory();
        let mut b = Cart::in_memory();
        let line_a = a.add(entry(1, EntryId::Item(1), 2.0), 3, Value::Null);
        let line_b = b.add(entry(1, EntryId::Item(1), 2.0), 3, Value::Null);
        a.set_quantity(&line_a, 0);
        b.remove(&line_b);
        assert_eq!(a.lines(), b.lines());
        assert!(a.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::in_memory();
        cart.add(entry(1, EntryId::Item(1), 2.0), 1, Value::Null);
        cart.remove("missing");
        cart.set_quantity("missing", 4);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_mixes_menu_and_entry_lines() {
        let mut cart = Cart::in_memory();
        cart.add(whole_menu(1, &[5.5, 3.25, 1.25]), 2, Value::Null);
        let line = cart.add(entry(1, EntryId::Item(9), 0.1), 1, Value::Null);
        cart.set_quantity(&line, 3);
        // (5.5 + 3.25 + 1.25) * 2 + 0.1 * 3
        assert_eq!(cart.total(), 20.3);
    }

    #[test]
    fn test_total_independent_of_mutation_order() {
        let mut a = Cart::in_memory();
        a.add(entry(1, EntryId::Item(1), 2.5), 1, Value::Null);
        a.add(entry(1, EntryId::Item(2), 4.0), 2, Value::Null);
        let tmp = a.add(entry(1, EntryId::Item(3), 9.0), 1, Value::Null);
        a.remove(&tmp);

        let mut b = Cart::in_memory();
        b.add(entry(1, EntryId::Item(2), 4.0), 1, Value::Null);
        b.add(entry(1, EntryId::Item(1), 2.5), 1, Value::Null);
        b.add(entry(1, EntryId::Item(2), 4.0), 1, Value::Null);

        assert_eq!(a.total(), b.total());
        assert_eq!(a.total(), 10.5);
    }

    #[test]
    fn test_clear_resets_selected_menu() {
        let mut cart = Cart::in_memory();
        cart.select_menu(ScheduledMenu {
            id: 1,
            name: "Friday Lunch".to_string(),
            date: date(),
            is_active: true,
            description: None,
            entries: Vec::new(),
        });
        cart.add(entry(1, EntryId::Item(1), 2.0), 1, Value::Null);
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.selected_menu().is_none());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_non_positive_add_counts_as_one() {
        let mut cart = Cart::in_memory();
        cart.add(entry(1, EntryId::Item(1), 2.0), 0, Value::Null);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_pending_order_forgotten_when_lines_change() {
        let order: Order = serde_json::from_value(json!({
            "id": 31,
            "customer_name": "Asha",
            "customer_email": "asha@example.com",
            "menu_date": "2026-10-24",
            "delivery_date": "2026-10-24",
            "payment_method": "online",
            "total": 4.0,
        }))
        .unwrap();

        let mut cart = Cart::in_memory();
        let line = cart.add(entry(1, EntryId::Item(1), 2.0), 2, Value::Null);
        cart.set_pending_order(order.clone());
        assert_eq!(cart.pending_order().map(|o| o.id), Some(31));

        cart.set_quantity(&line, 3);
        assert!(cart.pending_order().is_none());

        cart.set_pending_order(order);
        assert_eq!(cart.take_pending_order().map(|o| o.id), Some(31));
        assert!(cart.pending_order().is_none());
        assert_eq!(cart.item_count(), 3);
    }
}
