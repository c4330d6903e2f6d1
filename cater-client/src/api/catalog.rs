//! Catalog API (items and combos)

use crate::{ClientResult, HttpClient};
use shared::models::{
    Catalog, CatalogEntry, CatalogItem, CatalogItemCreate, CatalogItemUpdate, Combo, ComboCreate,
    ComboUpdate,
};

impl HttpClient {
    pub async fn catalog_items(&self) -> ClientResult<Vec<CatalogItem>> {
        self.get("menu/catalog/items").await
    }

    pub async fn combos(&self) -> ClientResult<Vec<Combo>> {
        self.get("menu/catalog/combos").await
    }

    /// Items and combos as one index
    pub async fn catalog(&self) -> ClientResult<Catalog> {
        let items = self.catalog_items().await?;
        let combos = self.combos().await?;
        Ok(Catalog::new(
            items
                .into_iter()
                .map(CatalogEntry::Item)
                .chain(combos.into_iter().map(CatalogEntry::Combo)),
        ))
    }

    pub async fn create_item(&self, item: &CatalogItemCreate) -> ClientResult<CatalogItem> {
        self.post("menu/catalog/items", item).await
    }

    pub async fn update_item(&self, id: i64, update: &CatalogItemUpdate) -> ClientResult<CatalogItem> {
        self.put(&format!("menu/catalog/items/{id}"), update).await
    }

    pub async fn delete_item(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("menu/catalog/items/{id}")).await
    }

    /// Create a combo after checking its components against the live catalog
    pub async fn create_combo(&self, combo: &ComboCreate) -> ClientResult<Combo> {
        self.catalog()
            .await?
            .validate_components(&combo.name, &combo.items)?;
        self.post("menu/catalog/combos", combo).await
    }

    pub async fn update_combo(&self, id: i64, update: &ComboUpdate) -> ClientResult<Combo> {
        if let Some(items) = &update.items {
            let name = update.name.clone().unwrap_or_else(|| format!("#{id}"));
            self.catalog().await?.validate_components(&name, items)?;
        }
        self.put(&format!("menu/catalog/combos/{id}"), update).await
    }

    pub async fn delete_combo(&self, id: i64) -> ClientResult<()> {
        self.delete(&format!("menu/catalog/combos/{id}")).await
    }
}
