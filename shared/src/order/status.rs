//! Order and payment status rules
//!
//! Order status follows a linear chain
//! `pending → confirmed → preparing → ready → delivered`. `cancelled` is a
//! side exit reachable only from `pending`. Payment status is tracked
//! independently and is never inferred from the order status.

use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status
///
/// Deserialized through [`FromStr`], so backend spellings such as
/// `"Cancelled"` or `"canceled"` land on the same variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
    /// Any status string the backend sends that is not recognized
    Unknown,
}

impl OrderStatus {
    /// The forward chain, in order
    pub const CHAIN: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Next status in the linear chain
    ///
    /// `None` means "no forward action available" (delivered, cancelled or
    /// unrecognized), not an error.
    pub fn next_status(self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled | Self::Unknown => None,
        }
    }

    /// Cancel is only offered while the order is still pending
    pub fn can_cancel(self) -> bool {
        self == Self::Pending
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Validate a caterer-driven status change
    pub fn transition_to(self, target: OrderStatus) -> AppResult<OrderStatus> {
        let allowed = match target {
            Self::Cancelled => self.can_cancel(),
            _ => self.next_status() == Some(target),
        };
        if allowed {
            Ok(target)
        } else {
            Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move order from {} to {}", self, target),
            )
            .with_detail("from", self.as_str())
            .with_detail("to", target.as_str()))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    /// Case-insensitive; anything unrecognized becomes [`OrderStatus::Unknown`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown,
        })
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

/// Payment status, independent of [`OrderStatus`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

/// How the customer pays
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Paid through the payment provider at checkout
    #[default]
    Online,
    /// Paid outside the application (cash, transfer); confirmed by the caterer
    Offline,
}

impl PaymentStatus {
    /// Caterer's "receive funds" action for offline-paid orders
    pub fn receive_funds(self, method: PaymentMethod) -> AppResult<PaymentStatus> {
        if method != PaymentMethod::Offline {
            return Err(AppError::with_message(
                ErrorCode::PaymentInvalidMethod,
                "Funds can only be received manually for offline payments",
            ));
        }
        self.complete()
    }

    /// Payment provider confirmation for online-paid orders
    pub fn confirm_online(self, method: PaymentMethod) -> AppResult<PaymentStatus> {
        if method != PaymentMethod::Online {
            return Err(AppError::with_message(
                ErrorCode::PaymentInvalidMethod,
                "Provider confirmation only applies to online payments",
            ));
        }
        self.complete()
    }

    fn complete(self) -> AppResult<PaymentStatus> {
        match self {
            Self::Pending | Self::Failed => Ok(Self::Completed),
            Self::Completed => Err(AppError::new(ErrorCode::PaymentAlreadyCompleted)),
            Self::Refunded | Self::Cancelled => Err(AppError::invalid_request(format!(
                "Payment is {} and cannot be completed",
                self.as_str()
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }
}
