//! Catering ordering core
//!
//! - [`cart`]: customer cart, pricing and checkout payload
//! - [`preparation`]: kitchen preparation manifest over a day's orders
//! - [`menu_guard`]: menu edit lock once orders exist
//! - [`state`]: explicit application state handle (cart + session)
//! - [`logger`]: tracing setup

pub mod cart;
pub mod logger;
pub mod menu_guard;
pub mod money;
pub mod preparation;
pub mod state;

pub use cart::{Cart, CartLine, CatalogSelection, MenuSelection, PricedSelection};
pub use preparation::PreparationManifest;
pub use state::{AppState, Session};
