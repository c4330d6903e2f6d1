//! Data models
//!
//! Shared between the ordering core and the REST client. IDs are `i64` as
//! issued by the backend; catalog references use the tagged [`EntryId`].

pub mod catalog;
pub mod feedback;
pub mod menu;
pub mod payment;

// Re-exports
pub use catalog::*;
pub use feedback::*;
pub use menu::*;
pub use payment::*;
