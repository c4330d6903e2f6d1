//! Payment Model
//!
//! The payment provider itself is never called directly: the backend creates
//! the provider's payment intent and reports confirmation back.

use crate::order::{PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Request body for `POST /payments/stripe/create-intent`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentCreate {
    pub order_id: i64,
    /// Amount in minor units (cents)
    pub amount: i64,
    pub currency: String,
}

/// Provider payment intent as relayed by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    #[serde(alias = "id")]
    pub payment_intent_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `POST /payments/stripe/confirm/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentConfirmation {
    #[serde(default)]
    pub order_id: Option<i64>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payment record from `GET /payments/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    #[serde(alias = "payment_id")]
    pub id: i64,
    pub order_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub provider_reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
