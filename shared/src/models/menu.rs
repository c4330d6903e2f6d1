//! Scheduled Menu Model

use super::catalog::EntryId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog entry as it appears on one scheduled menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuEntry {
    pub entry: EntryId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Catalog default unit price
    pub catalog_price: f64,
    /// Menu-level re-pricing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_override: Option<f64>,
}

impl MenuEntry {
    pub fn effective_price(&self) -> f64 {
        self.price_override.unwrap_or(self.catalog_price)
    }
}

/// Caterer-published, date-scoped menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledMenu {
    #[serde(alias = "menu_id")]
    pub id: i64,
    pub name: String,
    #[serde(alias = "menu_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub entries: Vec<MenuEntry>,
}

impl ScheduledMenu {
    pub fn entry(&self, id: EntryId) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.entry == id)
    }

    /// Entries grouped by category, in category-name order
    pub fn entries_by_category(&self) -> BTreeMap<&str, Vec<&MenuEntry>> {
        let mut grouped: BTreeMap<&str, Vec<&MenuEntry>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(entry.category.as_str()).or_default().push(entry);
        }
        grouped
    }
}

/// Menu entry reference used by create/update payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuEntryInput {
    pub entry: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_override: Option<f64>,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMenuCreate {
    pub name: String,
    pub date: NaiveDate,
    pub is_active: Option<bool>,
    pub description: Option<String>,
    pub entries: Vec<MenuEntryInput>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduledMenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<MenuEntryInput>>,
}
