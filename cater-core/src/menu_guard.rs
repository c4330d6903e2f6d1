//! Menu edit lock
//!
//! A scheduled menu may be toggled, edited or deleted only while no order
//! references it. The check runs against an order listing fetched just
//! before the edit, so an order placed in between is not seen.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::ScheduledMenu;
use shared::order::Order;

/// Orders placed against `menu`
///
/// An order matches on the menu date; when it also names a menu id, that id
/// must be the menu's. Cancelled orders still count.
pub fn orders_for_menu<'a>(
    menu: &'a ScheduledMenu,
    orders: &'a [Order],
) -> impl Iterator<Item = &'a Order> + 'a {
    orders.iter().filter(move |order| {
        order.menu_date == menu.date && order.menu_id.is_none_or(|id| id == menu.id)
    })
}

pub fn ensure_menu_editable(menu: &ScheduledMenu, orders: &[Order]) -> AppResult<()> {
    let count = orders_for_menu(menu, orders).count();
    if count == 0 {
        return Ok(());
    }
    tracing::debug!(menu_id = menu.id, count, "Menu is locked by existing orders");
    Err(AppError::with_message(
        ErrorCode::MenuHasOrders,
        format!("Menu '{}' already has {} order(s)", menu.name, count),
    )
    .with_detail("menu_id", menu.id)
    .with_detail("order_count", count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn menu() -> ScheduledMenu {
        ScheduledMenu {
            id: 5,
            name: "Friday Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
            is_active: true,
            description: None,
            entries: Vec::new(),
        }
    }

    fn order(menu_id: Option<i64>, date: &str, status: &str) -> Order {
        serde_json::from_value(json!({
            "order_id": 1,
            "customer_name": "Ravi",
            "customer_email": "ravi@example.com",
            "menu_id": menu_id,
            "menu_date": date,
            "delivery_date": date,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_no_orders_editable() {
        assert!(ensure_menu_editable(&menu(), &[]).is_ok());
        let other_day = [order(None, "2026-10-25", "pending")];
        assert!(ensure_menu_editable(&menu(), &other_day).is_ok());
    }

    #[test]
    fn test_order_on_date_locks_menu() {
        let orders = [order(None, "2026-10-24", "cancelled")];
        let err = ensure_menu_editable(&menu(), &orders).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuHasOrders);
    }

    #[test]
    fn test_other_menu_same_date_ignored() {
        let orders = [
            order(Some(6), "2026-10-24", "pending"),
            order(Some(5), "2026-10-24", "pending"),
        ];
        assert_eq!(orders_for_menu(&menu(), &orders).count(), 1);
    }
}
