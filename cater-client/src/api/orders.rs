//! Order API

use crate::{ClientResult, HttpClient};
use cater_core::PreparationManifest;
use chrono::NaiveDate;
use shared::order::{Order, OrderCreate, OrderUpdate};

impl HttpClient {
    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        let created: Order = self.post("orders/create_orders", order).await?;
        tracing::info!(order_id = created.id, total = created.total, "Order created");
        Ok(created)
    }

    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        self.get("orders/getallorders").await
    }

    pub async fn orders_by_menu_date(&self, date: NaiveDate) -> ClientResult<Vec<Order>> {
        self.get_query(
            "orders/getallorders/bymenudate",
            &[("menu_date", date.to_string())],
        )
        .await
    }

    pub async fn update_order(&self, id: i64, update: &OrderUpdate) -> ClientResult<Order> {
        self.put(&format!("orders/update/{id}"), update).await
    }

    /// Kitchen manifest for one menu date, rebuilt from the current orders
    pub async fn preparation_manifest(&self, date: NaiveDate) -> ClientResult<PreparationManifest> {
        let orders = self.orders_by_menu_date(date).await?;
        let manifest = PreparationManifest::for_menu_date(&orders, date);
        tracing::debug!(
            %date,
            orders = orders.len(),
            portions = manifest.total_portions(),
            "Preparation manifest built"
        );
        Ok(manifest)
    }
}
