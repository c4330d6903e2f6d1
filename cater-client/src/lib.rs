//! Cater Client - REST client for the catering backend
//!
//! Typed access to auth, menus, catalog, orders, payments and feedback,
//! plus the checkout and caterer flows built on top of them.

pub mod api;
pub mod caterer;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::FlyerUpload;
pub use caterer::CatererActions;
pub use checkout::{CheckoutOutcome, CheckoutRequest, checkout, confirm_checkout};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{HealthStatus, LoginResponse, UserInfo};
