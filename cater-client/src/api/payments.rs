//! Payment API
//!
//! The backend talks to the payment provider; this side only asks it to
//! create and confirm intents.

use crate::{ClientResult, HttpClient};
use shared::models::{PaymentConfirmation, PaymentIntent, PaymentIntentCreate, PaymentRecord};

impl HttpClient {
    pub async fn create_payment_intent(&self, request: &PaymentIntentCreate) -> ClientResult<PaymentIntent> {
        self.post("payments/stripe/create-intent", request).await
    }

    pub async fn confirm_payment(&self, payment_intent_id: &str) -> ClientResult<PaymentConfirmation> {
        self.post_empty(&format!("payments/stripe/confirm/{payment_intent_id}"))
            .await
    }

    pub async fn payments(&self) -> ClientResult<Vec<PaymentRecord>> {
        self.get("payments/").await
    }
}
