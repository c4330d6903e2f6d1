//! Shared types for the catering ordering stack
//!
//! Wire and domain types used by both the ordering core and the REST
//! client: catalog entries, scheduled menus, orders and their statuses,
//! order line-item normalization, error codes and the backend error body.

pub mod client;
pub mod error;
pub mod models;
pub mod order;
pub mod response;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{CatalogEntry, EntryId};
pub use order::{Order, OrderLineItem, OrderStatus, PaymentMethod, PaymentStatus};
