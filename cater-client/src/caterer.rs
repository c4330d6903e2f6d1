//! Caterer actions
//!
//! Menu edits and order lifecycle changes made by a signed-in caterer.
//! Every successful action is written to the audit log.

use crate::{ClientResult, HttpClient};
use cater_core::menu_guard::ensure_menu_editable;
use cater_core::{AppState, audit_log};
use shared::client::UserInfo;
use shared::models::{ScheduledMenu, ScheduledMenuUpdate};
use shared::order::{Order, OrderUpdate};

#[derive(Debug)]
pub struct CatererActions<'a> {
    client: &'a HttpClient,
    user: UserInfo,
}

impl<'a> CatererActions<'a> {
    /// Requires a signed-in caterer or admin
    pub fn new(client: &'a HttpClient, state: &AppState) -> ClientResult<Self> {
        let user = state.require_manager()?.clone();
        Ok(Self { client, user })
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    /// Edit a menu that has no orders yet
    ///
    /// The order check and the edit are two requests; an order placed in
    /// between is not detected.
    pub async fn update_menu(
        &self,
        menu: &ScheduledMenu,
        update: &ScheduledMenuUpdate,
    ) -> ClientResult<ScheduledMenu> {
        self.ensure_editable(menu).await?;
        let updated = self.client.update_menu(menu.id, update).await?;
        audit_log!(self.user.id, "update_menu", format!("menu:{}", menu.id));
        Ok(updated)
    }

    pub async fn set_menu_active(&self, menu: &ScheduledMenu, active: bool) -> ClientResult<ScheduledMenu> {
        let update = ScheduledMenuUpdate {
            is_active: Some(active),
            ..Default::default()
        };
        self.update_menu(menu, &update).await
    }

    pub async fn delete_menu(&self, menu: &ScheduledMenu) -> ClientResult<()> {
        self.ensure_editable(menu).await?;
        self.client.delete_menu(menu.id).await?;
        audit_log!(self.user.id, "delete_menu", format!("menu:{}", menu.id));
        Ok(())
    }

    /// Move an order one step along the status chain
    pub async fn advance_order(&self, order: &Order) -> ClientResult<Order> {
        self.apply(order, order.advance()?, "advance_order").await
    }

    /// Cancel a pending order
    pub async fn cancel_order(&self, order: &Order) -> ClientResult<Order> {
        self.apply(order, order.cancel()?, "cancel_order").await
    }

    /// Mark an offline payment as collected
    pub async fn receive_funds(&self, order: &Order) -> ClientResult<Order> {
        self.apply(order, order.receive_funds()?, "receive_funds").await
    }

    async fn apply(&self, order: &Order, update: OrderUpdate, action: &str) -> ClientResult<Order> {
        let updated = self.client.update_order(order.id, &update).await?;
        audit_log!(
            self.user.id,
            action,
            format!("order:{}", order.id),
            format!("{} -> {}", order.status, updated.status)
        );
        Ok(updated)
    }

    async fn ensure_editable(&self, menu: &ScheduledMenu) -> ClientResult<()> {
        let orders = self.client.orders_by_menu_date(menu.date).await?;
        ensure_menu_editable(menu, &orders)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, ClientError};
    use cater_core::Cart;
    use shared::ErrorCode;
    use shared::client::UserRole;

    fn user(role: UserRole) -> UserInfo {
        UserInfo {
            id: 3,
            email: "owner@example.com".into(),
            full_name: Some("Owner".into()),
            role,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_customer_cannot_act() {
        let client = ClientConfig::default().build_http_client().unwrap();
        let mut state = AppState::new(Cart::in_memory());
        assert!(CatererActions::new(&client, &state).is_err());

        state.sign_in("tok", Some(user(UserRole::Customer)));
        let err = CatererActions::new(&client, &state).unwrap_err();
        assert!(matches!(err, ClientError::App(_)));
        assert_eq!(err.code(), ErrorCode::PermissionDenied);

        state.set_user(user(UserRole::Caterer));
        let actions = CatererActions::new(&client, &state).unwrap();
        assert_eq!(actions.user().id, 3);
    }

    #[tokio::test]
    async fn test_illegal_transition_fails_locally() {
        let client = ClientConfig::new("http://127.0.0.1:9").build_http_client().unwrap();
        let mut state = AppState::new(Cart::in_memory());
        state.sign_in("tok", Some(user(UserRole::Admin)));
        let actions = CatererActions::new(&client, &state).unwrap();

        let delivered: Order = serde_json::from_value(serde_json::json!({
            "id": 8,
            "customer_name": "Asha",
            "customer_email": "asha@example.com",
            "menu_date": "2026-10-24",
            "delivery_date": "2026-10-24",
            "status": "delivered",
            "payment_method": "online",
        }))
        .unwrap();

        let err = actions.advance_order(&delivered).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStatusTransition);
        let err = actions.cancel_order(&delivered).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStatusTransition);
        let err = actions.receive_funds(&delivered).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PaymentInvalidMethod);
    }
}
