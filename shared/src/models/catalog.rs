//! Catalog Model
//!
//! Sellable entries are either simple items or combos of simple items.
//! The backend keeps the two in separate ID spaces (`menu_item_id` and
//! `combo_id`), so every reference goes through the tagged [`EntryId`].

use crate::error::{AppError, AppResult, ErrorCode};
use crate::order::ComboItemEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tagged catalog identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntryId {
    Item(i64),
    Combo(i64),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "item:{id}"),
            Self::Combo(id) => write!(f, "combo:{id}"),
        }
    }
}

/// Simple catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    #[serde(alias = "menu_item_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Default unit price
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Reference from a combo to one of its simple items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboComponentRef {
    pub menu_item_id: i64,
    pub quantity: i32,
}

/// Combo of simple items sold at its own price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Combo {
    #[serde(alias = "combo_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(alias = "combo_price")]
    pub price: f64,
    #[serde(alias = "combo_items", default)]
    pub items: Vec<ComboComponentRef>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "entry_type", rename_all = "snake_case")]
pub enum CatalogEntry {
    Item(CatalogItem),
    Combo(Combo),
}

impl CatalogEntry {
    pub fn id(&self) -> EntryId {
        match self {
            Self::Item(item) => EntryId::Item(item.id),
            Self::Combo(combo) => EntryId::Combo(combo.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Item(item) => &item.name,
            Self::Combo(combo) => &combo.name,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Self::Item(item) => &item.category,
            Self::Combo(combo) => &combo.category,
        }
    }

    /// Catalog default unit price
    pub fn price(&self) -> f64 {
        match self {
            Self::Item(item) => item.price,
            Self::Combo(combo) => combo.price,
        }
    }

    pub fn is_combo(&self) -> bool {
        matches!(self, Self::Combo(_))
    }
}

/// In-memory catalog index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<EntryId, CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.id(), e)).collect(),
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn item(&self, id: i64) -> Option<&CatalogItem> {
        match self.entries.get(&EntryId::Item(id)) {
            Some(CatalogEntry::Item(item)) => Some(item),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate_combo(&self, combo: &Combo) -> AppResult<()> {
        self.validate_components(&combo.name, &combo.items)
    }

    /// Check that every constituent is an existing simple item with a
    /// positive quantity
    pub fn validate_components(&self, combo_name: &str, items: &[ComboComponentRef]) -> AppResult<()> {
        if items.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::ComboInvalidComponent,
                format!("Combo '{}' has no items", combo_name),
            ));
        }
        for component in items {
            if component.quantity <= 0 {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!(
                        "Combo '{}' has non-positive quantity for item {}",
                        combo_name, component.menu_item_id
                    ),
                )
                .with_detail("menu_item_id", component.menu_item_id));
            }
            if self.item(component.menu_item_id).is_none() {
                return Err(AppError::with_message(
                    ErrorCode::ComboInvalidComponent,
                    format!(
                        "Combo '{}' references unknown item {}",
                        combo_name, component.menu_item_id
                    ),
                )
                .with_detail("menu_item_id", component.menu_item_id));
            }
        }
        Ok(())
    }

    /// Resolve a combo into the breakdown frozen into orders
    pub fn expand_combo(&self, combo: &Combo) -> AppResult<Vec<ComboItemEntry>> {
        self.validate_combo(combo)?;
        combo
            .items
            .iter()
            .map(|component| {
                let item = self.item(component.menu_item_id).ok_or_else(|| {
                    AppError::new(ErrorCode::CatalogEntryNotFound)
                        .with_detail("menu_item_id", component.menu_item_id)
                })?;
                Ok(ComboItemEntry {
                    menu_item_id: item.id,
                    menu_item_name: item.name.clone(),
                    quantity: component.quantity,
                })
            })
            .collect()
    }
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
}

/// Update item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Create combo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub items: Vec<ComboComponentRef>,
}

/// Update combo payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ComboComponentRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
