//! Endpoint groups
//!
//! Each submodule adds methods to [`HttpClient`](crate::HttpClient) for one
//! area of the backend API.

mod auth;
mod catalog;
mod feedback;
mod menu;
mod orders;
mod payments;

pub use menu::FlyerUpload;
