//! Order wire types
//!
//! `OrderCreate` is what checkout sends; `Order` is what the backend returns.
//! Items are frozen at creation time: each entry carries its own name, price
//! and (for combos) its constituent breakdown, so later catalog edits never
//! change a historical order.

use super::line_item::{OrderLineItem, parse_order_items};
use super::status::{OrderStatus, PaymentMethod, PaymentStatus};
use crate::error::{AppError, AppResult, ErrorCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Customer contact and delivery details
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerDetails {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
}

impl CustomerDetails {
    /// Checkout form validation; blocks submission on failure
    pub fn validate(&self) -> AppResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(AppError::with_message(ErrorCode::RequiredField, "Name is required")
                .with_detail("field", "customer_name"));
        }
        let email = self.customer_email.trim();
        if email.is_empty() {
            return Err(AppError::with_message(ErrorCode::RequiredField, "Email is required")
                .with_detail("field", "customer_email"));
        }
        if !is_plausible_email(email) {
            return Err(AppError::validation("Email address is invalid")
                .with_detail("field", "customer_email"));
        }
        Ok(())
    }
}

pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Constituent of a combo entry, frozen into the order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboItemEntry {
    pub menu_item_id: i64,
    pub menu_item_name: String,
    pub quantity: i32,
}

/// One frozen line of an order's `items` mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit price at order time
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub is_combo: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combo_items: Vec<ComboItemEntry>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub customization: Value,
}

/// Checkout payload for `POST /orders/create_orders`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCreate {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub menu_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub total: f64,
    /// Keyed by cart line id
    pub items: BTreeMap<String, OrderItemEntry>,
}

/// Patch for `PUT /orders/update/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

/// Server-persisted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(alias = "order_id")]
    pub id: i64,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<i64>,
    pub menu_date: NaiveDate,
    pub delivery_date: NaiveDate,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(alias = "total_amount", default)]
    pub total: f64,
    /// Raw items payload; see [`Order::line_items`]
    #[serde(default)]
    pub items: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Order {
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Canonical line items; an unreadable payload degrades to no items
    pub fn line_items(&self) -> Vec<OrderLineItem> {
        match parse_order_items(&self.items) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(order_id = self.id, error = %e, "Skipping unreadable order items");
                Vec::new()
            }
        }
    }

    /// Patch moving the order one step forward in the status chain
    pub fn advance(&self) -> AppResult<OrderUpdate> {
        let next = self.status.next_status().ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Order {} has no next status from {}", self.id, self.status),
            )
        })?;
        Ok(OrderUpdate {
            status: Some(next),
            payment_status: None,
        })
    }

    pub fn cancel(&self) -> AppResult<OrderUpdate> {
        let status = self.status.transition_to(OrderStatus::Cancelled)?;
        Ok(OrderUpdate {
            status: Some(status),
            payment_status: None,
        })
    }

    /// Caterer's "receive funds" action for offline-paid orders
    pub fn receive_funds(&self) -> AppResult<OrderUpdate> {
        let payment_status = self.payment_status.receive_funds(self.payment_method)?;
        Ok(OrderUpdate {
            status: None,
            payment_status: Some(payment_status),
        })
    }
}
