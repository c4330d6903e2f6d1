//! Checkout orchestration
//!
//! 1. Freeze the cart into an order payload (validated locally).
//! 2. Create the order.
//! 3. Offline payment: done, the cart is cleared.
//! 4. Online payment: ask the backend for a payment intent and hand its
//!    client secret to the payment provider. The created order is kept with
//!    the cart until [`confirm_checkout`] reports the payment completed, so
//!    calling [`checkout`] again after a failed payment step reuses that
//!    order instead of placing a second one.

use crate::session::track_session;
use crate::{ClientResult, HttpClient};
use cater_core::AppState;
use cater_core::money::to_minor_units;
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{PaymentConfirmation, PaymentIntent, PaymentIntentCreate};
use shared::order::{CustomerDetails, Order, PaymentMethod, PaymentStatus};
use tracing::{info, warn};

pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
    /// Defaults to the menu date
    pub delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Offline payment; the cart has been cleared
    Placed(Order),
    /// Online payment waiting on the provider
    AwaitingPayment {
        order: Order,
        intent: PaymentIntent,
        client_secret: String,
    },
}

impl CheckoutOutcome {
    pub fn order(&self) -> &Order {
        match self {
            Self::Placed(order) | Self::AwaitingPayment { order, .. } => order,
        }
    }
}

pub async fn checkout(
    client: &HttpClient,
    state: &mut AppState,
    request: CheckoutRequest,
) -> ClientResult<CheckoutOutcome> {
    if let Some(order) = state.cart().pending_order().cloned() {
        if request.payment_method == PaymentMethod::Online {
            info!(order_id = order.id, "Resuming payment for existing order");
            return request_payment(client, state, order).await;
        }
        warn!(order_id = order.id, "Payment method changed, placing a new order");
        state.cart_mut().take_pending_order();
    }

    let payload = state.cart().to_order_create(
        request.customer,
        request.payment_method,
        request.delivery_date,
    )?;

    let mut order = track_session(state, client.create_order(&payload).await)?;
    if order.total <= 0.0 {
        order.total = payload.total;
    }

    match payload.payment_method {
        PaymentMethod::Offline => {
            state.cart_mut().clear();
            info!(order_id = order.id, "Checkout complete, payment on delivery");
            Ok(CheckoutOutcome::Placed(order))
        }
        PaymentMethod::Online => {
            state.cart_mut().set_pending_order(order.clone());
            request_payment(client, state, order).await
        }
    }
}

async fn request_payment(
    client: &HttpClient,
    state: &mut AppState,
    order: Order,
) -> ClientResult<CheckoutOutcome> {
    let (intent, client_secret) = track_session(state, payment_intent_for(client, &order).await)?;
    info!(order_id = order.id, intent = %intent.payment_intent_id, "Awaiting online payment");
    Ok(CheckoutOutcome::AwaitingPayment {
        order,
        intent,
        client_secret,
    })
}

/// Create a payment intent for an order; fails without a client secret
pub async fn payment_intent_for(
    client: &HttpClient,
    order: &Order,
) -> ClientResult<(PaymentIntent, String)> {
    let intent = client
        .create_payment_intent(&PaymentIntentCreate {
            order_id: order.id,
            amount: to_minor_units(order.total),
            currency: DEFAULT_CURRENCY.to_string(),
        })
        .await?;
    let client_secret = intent
        .client_secret
        .clone()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            AppError::new(ErrorCode::PaymentIntentMissing).with_detail("order_id", order.id)
        })?;
    Ok((intent, client_secret))
}

/// Report the provider step back; clears the cart once the payment completed
pub async fn confirm_checkout(
    client: &HttpClient,
    state: &mut AppState,
    payment_intent_id: &str,
) -> ClientResult<PaymentConfirmation> {
    let confirmation = track_session(state, client.confirm_payment(payment_intent_id).await)?;
    if confirmation.payment_status == PaymentStatus::Completed {
        state.cart_mut().clear();
        info!(order_id = ?confirmation.order_id, "Online payment completed");
    } else {
        warn!(
            order_id = ?confirmation.order_id,
            status = confirmation.payment_status.as_str(),
            "Payment not completed, cart kept for retry"
        );
    }
    Ok(confirmation)
}
