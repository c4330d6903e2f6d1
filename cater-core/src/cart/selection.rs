//! What a cart line wraps
//!
//! A line added while browsing menus wraps the whole menu (its price is the
//! sum of the nested item prices); a line added from a menu's order page
//! wraps a single catalog entry with its own price. The two are separate
//! variants so pricing is a pattern match instead of a shape guess.

use crate::money::{sum_prices, to_decimal};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Catalog, CatalogEntry, EntryId, MenuEntry, ScheduledMenu};
use shared::order::ComboItemEntry;

/// One item nested in a whole-menu selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSelectionItem {
    pub entry: EntryId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Effective price on the menu
    pub price: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combo_items: Vec<ComboItemEntry>,
}

/// Whole menu as one line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSelection {
    pub menu_id: i64,
    pub menu_name: String,
    pub menu_date: NaiveDate,
    pub items: Vec<MenuSelectionItem>,
}

/// Single catalog entry as it appeared on a menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSelection {
    pub menu_id: i64,
    pub menu_date: NaiveDate,
    pub entry: EntryId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combo_items: Vec<ComboItemEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "selection", rename_all = "snake_case")]
pub enum PricedSelection {
    Menu(MenuSelection),
    Catalog(CatalogSelection),
}

impl PricedSelection {
    /// Price of one unit of this selection
    pub fn unit_price(&self) -> Decimal {
        match self {
            Self::Menu(menu) => sum_prices(menu.items.iter().map(|item| item.price)),
            Self::Catalog(entry) => to_decimal(entry.unit_price),
        }
    }

    pub fn menu_id(&self) -> i64 {
        match self {
            Self::Menu(menu) => menu.menu_id,
            Self::Catalog(entry) => entry.menu_id,
        }
    }

    pub fn menu_date(&self) -> NaiveDate {
        match self {
            Self::Menu(menu) => menu.menu_date,
            Self::Catalog(entry) => entry.menu_date,
        }
    }

    /// Catalog entry reference; `None` for a whole-menu line
    pub fn entry(&self) -> Option<EntryId> {
        match self {
            Self::Menu(_) => None,
            Self::Catalog(entry) => Some(entry.entry),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Menu(menu) => &menu.menu_name,
            Self::Catalog(entry) => &entry.name,
        }
    }

    /// Wrap a whole menu; combo entries are expanded when the catalog knows them
    pub fn whole_menu(menu: &ScheduledMenu, catalog: &Catalog) -> AppResult<Self> {
        let items = menu
            .entries
            .iter()
            .map(|entry| {
                Ok(MenuSelectionItem {
                    entry: entry.entry,
                    name: entry.name.clone(),
                    category: entry.category.clone(),
                    price: entry.effective_price(),
                    combo_items: combo_breakdown(entry, catalog)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self::Menu(MenuSelection {
            menu_id: menu.id,
            menu_name: menu.name.clone(),
            menu_date: menu.date,
            items,
        }))
    }

    /// Wrap one entry of a menu, priced with the menu's override
    pub fn menu_entry(menu: &ScheduledMenu, entry: EntryId, catalog: &Catalog) -> AppResult<Self> {
        let menu_entry = menu.entry(entry).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CatalogEntryNotFound,
                format!("{} is not on menu '{}'", entry, menu.name),
            )
            .with_detail("menu_id", menu.id)
        })?;

        Ok(Self::Catalog(CatalogSelection {
            menu_id: menu.id,
            menu_date: menu.date,
            entry,
            name: menu_entry.name.clone(),
            category: menu_entry.category.clone(),
            unit_price: menu_entry.effective_price(),
            combo_items: combo_breakdown(menu_entry, catalog)?,
        }))
    }
}

fn combo_breakdown(entry: &MenuEntry, catalog: &Catalog) -> AppResult<Vec<ComboItemEntry>> {
    match entry.entry {
        EntryId::Item(_) => Ok(Vec::new()),
        EntryId::Combo(_) => match catalog.get(entry.entry) {
            Some(CatalogEntry::Combo(combo)) => catalog.expand_combo(combo),
            _ => Err(AppError::with_message(
                ErrorCode::CatalogEntryNotFound,
                format!("Combo {} is missing from the catalog", entry.entry),
            )),
        },
    }
}
