//! # PayPal Gateway Library
//!
//! Thin client for the PayPal Orders v2 API built around a single cached
//! client-credentials access token that is refreshed ahead of expiry.
//!
//! Modules:
//! - `config` : service configuration, credentials and validation
//! - `cache` : access token cache with single-flight acquisition
//! - `sources` : OAuth2 token endpoint and the background refresh loop
//! - `resilience` : refresh-and-retry-once policy for rejected tokens
//! - `orders` : authorized executor and the order operations
//! - `server` : HTTP routes exposed to the checkout front end

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod orders;
pub mod resilience;
pub mod server;
pub mod sources;
pub mod utils;
#[cfg(test)]
mod tests;


pub use crate::error::GatewayError;
pub use crate::orders::api::PaypalOrders;
