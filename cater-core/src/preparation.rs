//! Kitchen preparation manifest
//!
//! Flattens a day's orders into "how many portions of each dish". Combo lines
//! contribute `constituent quantity x ordered quantity` to every constituent;
//! simple lines contribute their ordered quantity. The manifest is derived
//! data: rebuild it whenever the order set changes.

use chrono::NaiveDate;
use serde::Serialize;
use shared::order::{Order, OrderLineItem, clean_name, is_unknown_name};
use std::collections::BTreeMap;
use tracing::debug;

/// Portion count per cleaned item name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreparationManifest {
    portions: BTreeMap<String, i64>,
}

impl PreparationManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate every non-cancelled order
    ///
    /// Orders whose items payload cannot be read are skipped (logged by
    /// [`Order::line_items`]).
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut manifest = Self::new();
        for order in orders {
            if order.is_cancelled() {
                debug!(order_id = order.id, "Skipping cancelled order");
                continue;
            }
            for line in order.line_items() {
                manifest.add_line(&line);
            }
        }
        manifest
    }

    /// Aggregate the orders of one menu date
    pub fn for_menu_date<'a>(orders: impl IntoIterator<Item = &'a Order>, date: NaiveDate) -> Self {
        Self::from_orders(orders.into_iter().filter(|o| o.menu_date == date))
    }

    pub fn add_line(&mut self, line: &OrderLineItem) {
        for (name, portions) in line.portions() {
            self.add(name, portions);
        }
    }

    /// Accumulate portions under a cleaned name
    ///
    /// Unresolved names are dropped.
    pub fn add(&mut self, name: &str, portions: i64) {
        let name = clean_name(name);
        if is_unknown_name(&name) {
            debug!(portions, "Dropping portions with unresolved item name");
            return;
        }
        let bucket = self.portions.entry(name).or_insert(0);
        *bucket = bucket.saturating_add(portions);
    }

    pub fn get(&self, name: &str) -> i64 {
        self.portions.get(name).copied().unwrap_or(0)
    }

    pub fn total_portions(&self) -> i64 {
        self.portions.values().fold(0, |acc, qty| acc.saturating_add(*qty))
    }

    pub fn unique_item_count(&self) -> usize {
        self.portions.len()
    }

    /// Buckets in name order
    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> {
        self.portions.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    pub fn merge(&mut self, other: &PreparationManifest) {
        for (name, qty) in other.entries() {
            let bucket = self.portions.entry(name.to_string()).or_insert(0);
            *bucket = bucket.saturating_add(qty);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.portions.is_empty()
    }
}
