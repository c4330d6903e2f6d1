//! Orders
//!
//! - Status rules: order status chain and independent payment status
//! - Line items: normalization of historical `items` payloads
//! - Wire types: checkout payload, status patches, persisted orders

pub mod line_item;
pub mod status;
pub mod types;

// Re-exports
pub use line_item::{
    ComboComponent, LineKind, OrderLineItem, UNKNOWN_ITEM_NAME, clean_name, is_unknown_name,
    parse_order_items,
};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus};
pub use types::*;
